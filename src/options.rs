use wasm_bindgen::prelude::*;

// Configuration for a particle field. Every field is optional from the JS
// side; `new ParticleOptions()` starts from the defaults.
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParticleOptions {
    // Number of particles in the pool.
    pub quantity: u32,
    // Scales the pointer nudge.
    pub staticity: f64,
    // Damps the pointer nudge, 50 leaves it unchanged.
    pub ease: f64,
    // Flipping this forces a full pool regeneration.
    pub refresh: bool,
    // Stop advancing particles when the user prefers reduced motion.
    pub respect_reduced_motion: bool,
    // Time update and render with console timers.
    pub profile: bool,
}

impl ParticleOptions {
    pub const DEFAULT_QUANTITY: u32 = 50;
    pub const DEFAULT_STATICITY: f64 = 30.0;
    pub const DEFAULT_EASE: f64 = 50.0;

    // Replaces unusable staticity/ease values with the defaults
    pub fn sanitized(self) -> ParticleOptions {
        ParticleOptions {
            staticity: positive_or(self.staticity, ParticleOptions::DEFAULT_STATICITY),
            ease: positive_or(self.ease, ParticleOptions::DEFAULT_EASE),
            ..self
        }
    }

    // True when switching from `self` to `other` needs a new particle pool
    pub fn regenerates(&self, other: &ParticleOptions) -> bool {
        self.quantity != other.quantity
            || self.staticity != other.staticity
            || self.ease != other.ease
            || self.refresh != other.refresh
    }
}

#[wasm_bindgen]
impl ParticleOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ParticleOptions {
        ParticleOptions::default()
    }
}

impl Default for ParticleOptions {
    fn default() -> Self {
        ParticleOptions {
            quantity: ParticleOptions::DEFAULT_QUANTITY,
            staticity: ParticleOptions::DEFAULT_STATICITY,
            ease: ParticleOptions::DEFAULT_EASE,
            refresh: false,
            respect_reduced_motion: false,
            profile: false,
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
