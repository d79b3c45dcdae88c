// Pointer tracking and the nudge it applies to nearby particles.
// Coordinates are relative to the center of the container.

// Distance from the pointer beyond which particles are left alone.
pub const INTERACTION_RADIUS: f64 = 200.0;

const NUDGE_SCALE: f64 = 0.05;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    pos: Option<[f64; 2]>,
}

impl PointerState {
    pub fn position(&self) -> Option<[f64; 2]> {
        self.pos
    }

    // Records the pointer when it is strictly inside the container, otherwise
    // the last known position is kept. Returns whether it was recorded.
    pub fn track(&mut self, x: f64, y: f64, half_extents: [f64; 2]) -> bool {
        if x.abs() < half_extents[0] && y.abs() < half_extents[1] {
            self.pos = Some([x, y]);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.pos = None;
    }

    pub fn nudge(&self, particle_pos: [f64; 2], staticity: f64, ease: f64) -> [f64; 2] {
        match self.pos {
            Some(pointer) => nudge(particle_pos, pointer, staticity, ease),
            None => [0.0, 0.0],
        }
    }
}

// Linear falloff: 1 on top of the pointer, 0 at `INTERACTION_RADIUS` and beyond.
pub fn falloff(distance: f64) -> f64 {
    if distance >= INTERACTION_RADIUS {
        0.0
    } else {
        (INTERACTION_RADIUS - distance) / INTERACTION_RADIUS
    }
}

// Displacement pushing a particle away from the pointer for one frame.
pub fn nudge(particle_pos: [f64; 2], pointer: [f64; 2], staticity: f64, ease: f64) -> [f64; 2] {
    let to_pointer = glm::vec2(pointer[0] - particle_pos[0], pointer[1] - particle_pos[1]);
    let distance = glm::length(&to_pointer);
    let force = falloff(distance);
    if force <= 0.0 {
        return [0.0, 0.0];
    }

    // a particle right under the pointer has no direction to flee in
    let direction = if distance > 0.0 {
        to_pointer / distance
    } else {
        glm::vec2(0.0, 0.0)
    };
    let strength = force * staticity * NUDGE_SCALE * (crate::ParticleOptions::DEFAULT_EASE / ease);
    [-direction.x * strength, -direction.y * strength]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magnitude(v: [f64; 2]) -> f64 {
        (v[0] * v[0] + v[1] * v[1]).sqrt()
    }

    #[test]
    fn tracks_only_inside_the_container() {
        let mut pointer = PointerState::default();
        assert!(pointer.track(10.0, -20.0, [100.0, 50.0]));
        assert_eq!(pointer.position(), Some([10.0, -20.0]));

        // on the edge is outside, keep the last position
        assert!(!pointer.track(100.0, 0.0, [100.0, 50.0]));
        assert_eq!(pointer.position(), Some([10.0, -20.0]));

        pointer.reset();
        assert_eq!(pointer.position(), None);
    }

    #[test]
    fn absent_pointer_applies_no_force() {
        let pointer = PointerState::default();
        assert_eq!(pointer.nudge([5.0, 5.0], 30.0, 50.0), [0.0, 0.0]);
    }

    #[test]
    fn pushes_away_from_the_pointer() {
        let delta = nudge([10.0, 0.0], [0.0, 0.0], 30.0, 50.0);
        assert!(delta[0] > 0.0);
        assert_eq!(delta[1], 0.0);

        let delta = nudge([0.0, 10.0], [0.0, 20.0], 30.0, 50.0);
        assert!(delta[1] < 0.0);
    }

    #[test]
    fn matches_reference_strength_at_default_ease() {
        // distance 100 gives half force: 0.5 * 30 * 0.05
        let delta = nudge([100.0, 0.0], [0.0, 0.0], 30.0, 50.0);
        assert!((delta[0] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn force_decreases_with_distance() {
        let mut last = f64::INFINITY;
        for step in 1..40 {
            let distance = step as f64 * 5.0;
            let strength = magnitude(nudge([distance, 0.0], [0.0, 0.0], 30.0, 50.0));
            assert!(strength < last, "not decreasing at {}", distance);
            last = strength;
        }
        assert_eq!(falloff(0.0), 1.0);
        assert_eq!(falloff(INTERACTION_RADIUS), 0.0);
        assert_eq!(nudge([250.0, 0.0], [0.0, 0.0], 30.0, 50.0), [0.0, 0.0]);
    }

    #[test]
    fn coincident_pointer_does_not_divide_by_zero() {
        let delta = nudge([3.0, 4.0], [3.0, 4.0], 30.0, 50.0);
        assert_eq!(delta, [0.0, 0.0]);
    }

    #[test]
    fn larger_ease_damps_the_nudge() {
        let gentle = magnitude(nudge([50.0, 0.0], [0.0, 0.0], 30.0, 100.0));
        let default = magnitude(nudge([50.0, 0.0], [0.0, 0.0], 30.0, 50.0));
        assert!((gentle * 2.0 - default).abs() < 1e-12);
    }
}
