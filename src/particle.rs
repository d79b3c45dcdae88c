// Simple particle struct to keep track of individual position, velocity, radius and color.
// Positions are relative to the center of the container.

use crate::color::Color;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub color: Color,
}

impl Particle {
    pub const MAX_SPEED: f64 = 0.1;
    pub const MIN_RADIUS: f64 = 0.5;
    pub const MAX_RADIUS: f64 = 2.0;

    pub fn new(pos: [f64; 2], vel: [f64; 2], radius: f64, color: Color) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            color,
        }
    }

    // Random particle somewhere inside a container with the given half extents
    pub fn random<R: Rng>(rng: &mut R, half_extents: [f64; 2], color: Color) -> Particle {
        let pos_x = (rng.gen::<f64>() * 2.0 - 1.0) * half_extents[0];
        let pos_y = (rng.gen::<f64>() * 2.0 - 1.0) * half_extents[1];
        let vel_x = (rng.gen::<f64>() * 2.0 - 1.0) * Particle::MAX_SPEED;
        let vel_y = (rng.gen::<f64>() * 2.0 - 1.0) * Particle::MAX_SPEED;
        let radius =
            rng.gen::<f64>() * (Particle::MAX_RADIUS - Particle::MIN_RADIUS) + Particle::MIN_RADIUS;
        Particle::new([pos_x, pos_y], [vel_x, vel_y], radius, color)
    }

    pub fn integrate(&mut self) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
    }

    // Points the velocity back inward on every axis where the leading edge
    // has crossed the container's half extent
    pub fn bounce(&mut self, half_extents: [f64; 2]) {
        for axis in 0..2 {
            let limit = half_extents[axis];
            if self.pos[axis] + self.radius > limit && self.vel[axis] > 0.0 {
                self.vel[axis] = -self.vel[axis];
            } else if self.pos[axis] - self.radius < -limit && self.vel[axis] < 0.0 {
                self.vel[axis] = -self.vel[axis];
            }
        }
    }

    // Keeps the center within one radius of the container edge
    pub fn confine(&mut self, half_extents: [f64; 2]) {
        for axis in 0..2 {
            let limit = half_extents[axis] + self.radius;
            self.pos[axis] = self.pos[axis].max(-limit).min(limit);
        }
    }

    pub fn displace(&mut self, delta: [f64; 2]) {
        self.pos[0] += delta[0];
        self.pos[1] += delta[1];
    }
}
