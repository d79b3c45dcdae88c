// Browser binding: drives a ParticleField on an `HtmlCanvasElement`.
// The canvas is sized to fill its parent element. Pointer, touch and resize
// events are listened for only while the animation is started, and `stop()`
// (or freeing the object from JS) detaches every listener and cancels the
// pending animation frame.

use crate::color::Theme;
use crate::field::ParticleField;
use crate::frame_loop::FrameLoop;
use crate::options::ParticleOptions;
use crate::renderer::CanvasRenderer;
use crate::utils::{self, Timer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent,
    Window,
};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[wasm_bindgen]
pub struct ParticleCanvas {
    state: Rc<RefCell<CanvasState>>,
    listeners: Vec<Listener>,
    frame_loop: Option<FrameLoop>,
}

#[wasm_bindgen]
impl ParticleCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        options: &ParticleOptions,
        theme: &str,
    ) -> Result<ParticleCanvas, JsValue> {
        ParticleCanvas::with_rng(canvas, options, theme, StdRng::from_entropy())
    }

    // Same as the constructor, but every generated pool follows from `seed`.
    pub fn seeded(
        canvas: HtmlCanvasElement,
        options: &ParticleOptions,
        theme: &str,
        seed: u32,
    ) -> Result<ParticleCanvas, JsValue> {
        ParticleCanvas::with_rng(canvas, options, theme, StdRng::seed_from_u64(seed as u64))
    }

    // Attaches input listeners and starts the frame loop. Does nothing if already running.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.is_running() {
            return Ok(());
        }
        // a loop that died on its own still holds listeners
        self.stop();
        self.state.borrow_mut().setup()?;
        if let Err(err) = self.attach_listeners() {
            self.listeners.clear();
            return Err(err);
        }

        let window = self.state.borrow().window.clone();
        let state = self.state.clone();
        let frame_loop = FrameLoop::start(window, move || state.borrow_mut().draw_frame());
        match frame_loop {
            Ok(frame_loop) => {
                self.frame_loop = Some(frame_loop);
                Ok(())
            }
            Err(err) => {
                self.listeners.clear();
                Err(err)
            }
        }
    }

    // Cancels the frame loop and detaches every listener.
    pub fn stop(&mut self) {
        if let Some(mut frame_loop) = self.frame_loop.take() {
            frame_loop.stop();
        }
        self.listeners.clear();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop
            .as_ref()
            .map_or(false, |frame_loop| frame_loop.is_running())
    }

    // Re-measures the container and regenerates the pool.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        self.state.borrow_mut().setup()
    }

    pub fn set_options(&mut self, options: &ParticleOptions) {
        let mut state = self.state.borrow_mut();
        state.field.set_options(*options);
        state.apply_motion_preference();
    }

    pub fn set_theme(&mut self, theme: &str) -> Result<(), JsValue> {
        let theme = parse_theme(theme)?;
        self.state.borrow_mut().field.set_theme(theme);
        Ok(())
    }

    // Pointer position relative to the container center, in CSS pixels.
    pub fn set_pointer(&mut self, x: f64, y: f64) -> bool {
        self.state.borrow_mut().field.track_pointer(x, y)
    }

    pub fn clear_pointer(&mut self) {
        self.state.borrow_mut().field.clear_pointer();
    }

    pub fn has_pointer(&self) -> bool {
        self.state.borrow().field.pointer().position().is_some()
    }

    // Last tracked pointer as `[x, y]` relative to the container center, empty when absent.
    pub fn pointer(&self) -> Vec<f64> {
        match self.state.borrow().field.pointer().position() {
            Some([x, y]) => vec![x, y],
            None => Vec::new(),
        }
    }

    // Runs a single frame outside the loop.
    pub fn tick(&mut self) {
        self.state.borrow_mut().draw_frame();
    }

    pub fn particle_count(&self) -> u32 {
        self.state.borrow().field.particles().len() as u32
    }
}

impl ParticleCanvas {
    fn with_rng(
        canvas: HtmlCanvasElement,
        options: &ParticleOptions,
        theme: &str,
        rng: StdRng,
    ) -> Result<ParticleCanvas, JsValue> {
        utils::set_panic_hook();
        let theme = parse_theme(theme)?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let field = ParticleField::new(rng, *options, theme, 0.0, 0.0);
        let mut state = CanvasState {
            window,
            canvas,
            context: None,
            field,
        };
        state.setup()?;

        Ok(ParticleCanvas {
            state: Rc::new(RefCell::new(state)),
            listeners: Vec::new(),
            frame_loop: None,
        })
    }

    fn attach_listeners(&mut self) -> Result<(), JsValue> {
        let (window, leave_target) = {
            let state = self.state.borrow();
            let leave_target: EventTarget = match state.canvas.parent_element() {
                Some(parent) => parent.into(),
                None => state.canvas.clone().into(),
            };
            (state.window.clone(), leave_target)
        };
        let window_target: EventTarget = window.into();

        let state = self.state.clone();
        self.listen(&window_target, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                state
                    .borrow_mut()
                    .track_client_pointer(event.client_x() as f64, event.client_y() as f64);
            }
        })?;

        let state = self.state.clone();
        self.listen(&window_target, "touchmove", move |event| {
            let touch = event
                .dyn_ref::<TouchEvent>()
                .and_then(|event| event.touches().get(0));
            if let Some(touch) = touch {
                state
                    .borrow_mut()
                    .track_client_pointer(touch.client_x() as f64, touch.client_y() as f64);
            }
        })?;

        let state = self.state.clone();
        self.listen(&window_target, "touchend", move |_| {
            state.borrow_mut().field.clear_pointer();
        })?;

        let state = self.state.clone();
        self.listen(&leave_target, "mouseleave", move |_| {
            state.borrow_mut().field.clear_pointer();
        })?;

        let state = self.state.clone();
        self.listen(&window_target, "resize", move |_| {
            if let Err(err) = state.borrow_mut().setup() {
                crate::log!("particle canvas resize failed: {:?}", err);
            }
        })
    }

    fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }
}

impl Drop for ParticleCanvas {
    fn drop(&mut self) {
        self.stop();
    }
}

struct CanvasState {
    window: Window,
    canvas: HtmlCanvasElement,
    context: Option<CanvasRenderingContext2d>,
    field: ParticleField<StdRng>,
}

impl CanvasState {
    // Sizes the canvas to its container and regenerates the pool. A canvas that
    // is not in the layout yet is left alone until the next resize.
    fn setup(&mut self) -> Result<(), JsValue> {
        let (width, height) = match self.container_size() {
            Some(size) => size,
            None => {
                crate::log!("particle canvas has no container yet, skipping setup");
                self.context = None;
                return Ok(());
            }
        };

        let pixel_ratio = self.window.device_pixel_ratio().max(1.0);
        self.canvas.set_width((width * pixel_ratio) as u32);
        self.canvas.set_height((height * pixel_ratio) as u32);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", width))?;
        style.set_property("height", &format!("{}px", height))?;

        self.context = match self.canvas.get_context("2d")? {
            Some(context) => context.dyn_into::<CanvasRenderingContext2d>().ok(),
            None => None,
        };
        match &self.context {
            Some(context) => CanvasRenderer::new(context).set_pixel_ratio(pixel_ratio)?,
            None => {
                crate::log!("2d context unavailable, particle canvas will not draw");
            }
        }

        self.field.resize(width, height);
        self.apply_motion_preference();
        Ok(())
    }

    fn container_size(&self) -> Option<(f64, f64)> {
        let container = self.canvas.parent_element()?;
        Some((container.client_width() as f64, container.client_height() as f64))
    }

    fn apply_motion_preference(&mut self) {
        let paused = self.field.options().respect_reduced_motion && prefers_reduced_motion(&self.window);
        self.field.set_motion_paused(paused);
    }

    fn track_client_pointer(&mut self, client_x: f64, client_y: f64) {
        let rect = self.canvas.get_bounding_client_rect();
        let x = client_x - rect.left() - rect.width() / 2.0;
        let y = client_y - rect.top() - rect.height() / 2.0;
        self.field.track_pointer(x, y);
    }

    fn draw_frame(&mut self) {
        let CanvasState { context, field, .. } = self;
        let context = match context {
            Some(context) => context,
            None => return,
        };
        let profile = field.options().profile;

        {
            let _timer = Timer::start_if(profile, "ParticleField::update");
            field.update();
        }

        let _timer = Timer::start_if(profile, "ParticleField::render");
        let mut renderer = CanvasRenderer::new(context);
        if let Err(err) = field.render(&mut renderer) {
            crate::log!("particle render failed: {:?}", err);
        }
    }
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            crate::log!("failed to detach {} listener: {:?}", self.event, err);
        }
    }
}

fn parse_theme(theme: &str) -> Result<Theme, JsValue> {
    theme
        .parse::<Theme>()
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

fn prefers_reduced_motion(window: &Window) -> bool {
    match window.match_media(REDUCED_MOTION_QUERY) {
        Ok(Some(query)) => query.matches(),
        _ => false,
    }
}
