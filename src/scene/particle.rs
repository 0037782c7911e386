use rand::Rng;

use crate::foundation::core::{Point, Vec2};

/// Particles created per burst.
pub const BURST_SIZE: usize = 5;
/// Downward acceleration added to `vel.y` every step, in pixels per step².
pub const GRAVITY: f64 = 0.1;
/// Opacity lost every step.
pub const FADE_PER_STEP: f64 = 0.05;
/// Maximum horizontal spawn offset from the burst origin, in pixels.
pub const SPAWN_JITTER_PX: f64 = 2.0;

/// One short-lived decorative projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Top-left corner of the particle sprite, in pixels.
    pub pos: Point,
    /// Velocity in pixels per step.
    pub vel: Vec2,
    /// Opacity multiplier in `(0, 1]` while alive.
    pub alpha: f64,
}

impl Particle {
    fn integrate(&mut self) {
        self.pos += self.vel;
        self.vel.y += GRAVITY;
        self.alpha -= FADE_PER_STEP;
    }

    /// `false` once the particle has fully faded.
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }
}

/// Create a burst of [`BURST_SIZE`] particles at `origin`.
///
/// Each particle starts at full opacity with a small upward kick and a small sideways drift.
pub fn spawn_burst<R: Rng + ?Sized>(origin: Point, rng: &mut R) -> Vec<Particle> {
    (0..BURST_SIZE)
        .map(|_| Particle {
            pos: Point::new(
                origin.x + rng.random_range(-SPAWN_JITTER_PX..SPAWN_JITTER_PX),
                origin.y,
            ),
            vel: Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-3.0..-2.0)),
            alpha: 1.0,
        })
        .collect()
}

/// Advance every particle by one step and drop the ones that have faded out.
pub fn advance_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.integrate();
    }
    particles.retain(Particle::is_alive);
}

#[cfg(test)]
#[path = "../../tests/unit/scene/particle.rs"]
mod tests;
