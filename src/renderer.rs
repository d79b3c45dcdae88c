// Drawing target for the particle field. The field only ever clears the
// surface and fills circles, so that is all a surface has to provide.

use crate::color::Color;
use std::f64::consts::PI;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    type Error;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    // Coordinates are in surface pixels, origin at the top left
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &Color) -> Result<(), Self::Error>;
}

// 2d canvas context, drawing in CSS pixels once the transform accounts for the
// device pixel ratio
pub struct CanvasRenderer<'a> {
    pub context: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasRenderer<'a> {
    pub fn new(context: &'a CanvasRenderingContext2d) -> Self {
        CanvasRenderer { context }
    }

    // Scales drawing so one unit is one CSS pixel on a `pixel_ratio` backing store
    pub fn set_pixel_ratio(&self, pixel_ratio: f64) -> Result<(), JsValue> {
        self.context
            .set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0)
    }
}

impl<'a> Surface for CanvasRenderer<'a> {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.context.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &Color) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context.arc(x, y, radius, 0.0, 2.0 * PI)?;
        #[allow(deprecated)]
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.fill();
        Ok(())
    }
}
