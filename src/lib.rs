// Ambient particle field for a canvas: a pool of small circles that drift,
// bounce off the edges of their container and get nudged away from the
// pointer, redrawn every animation frame.
// ParticleField holds the simulation and can be driven directly (it is
// generic over its random source and draws through the Surface trait).
// ParticleCanvas wires a field to an `HtmlCanvasElement` in the browser.

extern crate nalgebra_glm as glm;

mod utils;

pub mod animator;
pub mod color;
pub mod field;
pub mod frame_loop;
pub mod options;
pub mod particle;
pub mod pointer;
pub mod renderer;

use wasm_bindgen::prelude::*;

pub use crate::animator::ParticleCanvas;
pub use crate::color::{Color, ParseThemeError, Theme};
pub use crate::field::ParticleField;
pub use crate::options::ParticleOptions;
pub use crate::particle::Particle;
pub use crate::pointer::{PointerState, INTERACTION_RADIUS};
pub use crate::renderer::{CanvasRenderer, Surface};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}
