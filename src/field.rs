// The particle pool and everything that happens to it each frame.
// A ParticleField owns its particles outright. Any change that affects
// how particles are generated (container size, options, theme) throws the
// whole pool away and draws a fresh one from the field's random source.

use crate::color::Theme;
use crate::options::ParticleOptions;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::renderer::Surface;
use rand::Rng;

pub struct ParticleField<R: Rng> {
    rng: R,
    options: ParticleOptions,
    theme: Theme,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: PointerState,
    motion_paused: bool,
}

impl<R: Rng> ParticleField<R> {
    // Creates a field for a `width` x `height` container and fills its pool.
    pub fn new(rng: R, options: ParticleOptions, theme: Theme, width: f64, height: f64) -> Self {
        let mut field = ParticleField {
            rng,
            options: options.sanitized(),
            theme,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            pointer: PointerState::default(),
            motion_paused: false,
        };
        field.set_size(width, height);
        field.regenerate();
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn options(&self) -> &ParticleOptions {
        &self.options
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn half_extents(&self) -> [f64; 2] {
        [self.width / 2.0, self.height / 2.0]
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn motion_paused(&self) -> bool {
        self.motion_paused
    }

    // Frozen particles are still rendered, they just stop moving.
    pub fn set_motion_paused(&mut self, paused: bool) {
        self.motion_paused = paused;
    }

    // Discards the pool and generates `quantity` new particles.
    pub fn regenerate(&mut self) {
        let half_extents = self.half_extents();
        let color = self.theme.particle_color();
        let quantity = self.options.quantity as usize;

        self.particles.clear();
        self.particles.reserve(quantity);
        for _ in 0..quantity {
            let particle = Particle::random(&mut self.rng, half_extents, color);
            self.particles.push(particle);
        }
    }

    // New container size. Always regenerates, even if the size is unchanged.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.set_size(width, height);
        self.regenerate();
    }

    // Returns whether the pool was regenerated.
    pub fn set_options(&mut self, options: ParticleOptions) -> bool {
        let options = options.sanitized();
        let regenerate = self.options.regenerates(&options);
        self.options = options;
        if regenerate {
            self.regenerate();
        }
        regenerate
    }

    // Returns whether the pool was regenerated.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if self.theme == theme {
            return false;
        }
        self.theme = theme;
        self.regenerate();
        true
    }

    // Pointer position relative to the container center.
    pub fn track_pointer(&mut self, x: f64, y: f64) -> bool {
        let half_extents = self.half_extents();
        self.pointer.track(x, y, half_extents)
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.reset();
    }

    // Advances every particle by one frame.
    pub fn update(&mut self) {
        if self.motion_paused {
            return;
        }

        let half_extents = self.half_extents();
        let staticity = self.options.staticity;
        let ease = self.options.ease;
        for particle in &mut self.particles {
            particle.integrate();
            particle.bounce(half_extents);
            let delta = self.pointer.nudge(particle.pos, staticity, ease);
            particle.displace(delta);
            particle.confine(half_extents);
        }
    }

    // Clears the surface and draws every particle. Returns the number of circles drawn.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<usize, S::Error> {
        surface.clear(self.width, self.height)?;
        let center_x = self.width / 2.0;
        let center_y = self.height / 2.0;
        for particle in &self.particles {
            surface.fill_circle(
                center_x + particle.pos[0],
                center_y + particle.pos[1],
                particle.radius,
                &particle.color,
            )?;
        }
        Ok(self.particles.len())
    }

    // One animation frame: update, then render.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) -> Result<usize, S::Error> {
        self.update();
        self.render(surface)
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.height = if height.is_finite() { height.max(0.0) } else { 0.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::pointer::INTERACTION_RADIUS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::convert::Infallible;

    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        circles: Vec<(f64, f64, f64, Color)>,
    }

    impl Surface for RecordingSurface {
        type Error = Infallible;

        fn clear(&mut self, _width: f64, _height: f64) -> Result<(), Infallible> {
            self.clears += 1;
            self.circles.clear();
            Ok(())
        }

        fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &Color) -> Result<(), Infallible> {
            self.circles.push((x, y, radius, *color));
            Ok(())
        }
    }

    fn field(quantity: u32, width: f64, height: f64) -> ParticleField<StdRng> {
        let options = ParticleOptions {
            quantity,
            ..ParticleOptions::default()
        };
        ParticleField::new(StdRng::seed_from_u64(42), options, Theme::Dark, width, height)
    }

    fn within_bounds(field: &ParticleField<StdRng>) -> bool {
        let [half_w, half_h] = field.half_extents();
        field
            .particles()
            .iter()
            .all(|p| p.pos[0].abs() <= half_w + p.radius && p.pos[1].abs() <= half_h + p.radius)
    }

    #[test]
    fn pool_matches_quantity() {
        for &quantity in &[0, 1, 50, 333] {
            assert_eq!(field(quantity, 300.0, 200.0).particles().len(), quantity as usize);
        }
    }

    #[test]
    fn stays_in_bounds_over_many_frames() {
        let mut field = field(200, 120.0, 80.0);
        for frame in 0..5000 {
            // drag the pointer along the edges to push particles outward
            let t = frame as f64 * 0.01;
            field.track_pointer(55.0 * t.cos(), 35.0 * t.sin());
            field.update();
            assert!(within_bounds(&field), "escaped on frame {}", frame);
        }
    }

    #[test]
    fn absent_pointer_leaves_only_velocity() {
        let mut field = field(30, 1000.0, 1000.0);
        assert!(field.track_pointer(0.0, 0.0));
        assert_eq!(field.pointer().position(), Some([0.0, 0.0]));
        field.clear_pointer();
        assert_eq!(field.pointer().position(), None);

        let before = field.particles().to_vec();
        field.update();
        for (old, new) in before.iter().zip(field.particles()) {
            // large container, nothing reaches an edge in one frame
            assert_eq!(new.pos, [old.pos[0] + old.vel[0], old.pos[1] + old.vel[1]]);
        }
    }

    #[test]
    fn pointer_at_center_pushes_nearby_particles_outward() {
        let mut field = field(10, 400.0, 400.0);
        for particle in &mut field.particles {
            particle.vel = [0.0, 0.0];
        }
        assert!(field.track_pointer(0.0, 0.0));

        let before = field.particles().to_vec();
        field.update();
        for (old, new) in before.iter().zip(field.particles()) {
            let old_distance = old.pos[0].hypot(old.pos[1]);
            let new_distance = new.pos[0].hypot(new.pos[1]);
            if old_distance < INTERACTION_RADIUS {
                assert!(new_distance >= old_distance);
            } else {
                assert_eq!(new.pos, old.pos);
            }
        }
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let mut field = field(0, 400.0, 400.0);
        let mut surface = RecordingSurface::default();
        let drawn = field.frame(&mut surface).unwrap();
        assert_eq!(drawn, 0);
        assert_eq!(surface.clears, 1);
        assert!(surface.circles.is_empty());
    }

    #[test]
    fn renders_relative_to_canvas_center() {
        let mut field = field(1, 400.0, 300.0);
        field.particles[0].pos = [-10.0, 25.0];
        let mut surface = RecordingSurface::default();
        assert_eq!(field.render(&mut surface).unwrap(), 1);

        let (x, y, radius, color) = surface.circles[0];
        assert_eq!((x, y), (190.0, 175.0));
        assert_eq!(radius, field.particles()[0].radius);
        assert_eq!(color, Theme::DARK_PARTICLE);
    }

    #[test]
    fn resize_regenerates_within_new_bounds() {
        let mut field = field(100, 1000.0, 1000.0);
        field.resize(40.0, 20.0);
        assert_eq!(field.particles().len(), 100);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.pos[0].abs() <= 20.0 && p.pos[1].abs() <= 10.0));
    }

    #[test]
    fn repeated_resize_does_not_accumulate() {
        let mut field = field(25, 300.0, 300.0);
        field.resize(300.0, 300.0);
        let first = field.particles().to_vec();
        field.resize(300.0, 300.0);
        assert_eq!(first.len(), 25);
        assert_eq!(field.particles().len(), 25);
        assert_ne!(first, field.particles());
    }

    #[test]
    fn same_seed_same_pool() {
        let a = field(20, 500.0, 500.0);
        let b = field(20, 500.0, 500.0);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn theme_change_recolors_through_regeneration() {
        let mut field = field(5, 100.0, 100.0);
        assert!(!field.set_theme(Theme::Dark));
        assert!(field.set_theme(Theme::Light));
        assert_eq!(field.theme(), Theme::Light);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.color == Theme::LIGHT_PARTICLE));
    }

    #[test]
    fn option_changes_regenerate_the_pool() {
        let mut field = field(5, 100.0, 100.0);
        let grown = ParticleOptions {
            quantity: 12,
            ..*field.options()
        };
        assert!(field.set_options(grown));
        assert_eq!(field.particles().len(), 12);

        let before = field.particles().to_vec();
        let refreshed = ParticleOptions {
            refresh: !grown.refresh,
            ..grown
        };
        assert!(field.set_options(refreshed));
        assert_ne!(before, field.particles());

        let profiled = ParticleOptions {
            profile: true,
            ..refreshed
        };
        let before = field.particles().to_vec();
        assert!(!field.set_options(profiled));
        assert_eq!(before, field.particles());
    }

    #[test]
    fn paused_motion_keeps_positions() {
        let mut field = field(10, 200.0, 200.0);
        field.set_motion_paused(true);
        assert!(field.motion_paused());
        let before = field.particles().to_vec();
        field.update();
        assert_eq!(before, field.particles());
    }

    #[test]
    fn bad_sizes_collapse_to_empty_container() {
        let field = field(3, -5.0, f64::NAN);
        assert_eq!(field.size(), (0.0, 0.0));
        assert!(field.particles().iter().all(|p| p.pos == [0.0, 0.0]));
    }
}
