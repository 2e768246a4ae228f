//! A single falling, bouncing projectile

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// One projectile. Spawned just above the top edge with a randomized
/// downward velocity; higher waves drift faster horizontally. A projectile
/// starts out waiting (movement disabled) and is released as its wave
/// progresses.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    bounds: Vec2,
    released: bool,
    off_screen: bool,
}

impl Projectile {
    /// Spawn a waiting projectile for the given wave inside the given bounds
    pub fn spawn(rng: &mut impl Rng, wave_number: u32, width: f32, height: f32) -> Self {
        let x = rng.random::<f32>() * width;
        let vy = rng.random::<f32>() * PROJECTILE_VY_SPREAD + PROJECTILE_VY_MIN;

        // Direction picked by parity of a digit draw; the wave term biases
        // the drift so later waves slide sideways faster
        let drift = wave_number as f32 * DRIFT_PER_WAVE;
        let digit = (rng.random::<f32>() * 10.0) as u32;
        let vx = if digit % 2 == 0 {
            rng.random::<f32>() * PROJECTILE_VX_SPREAD + drift
        } else {
            -(rng.random::<f32>() * PROJECTILE_VX_SPREAD) + drift
        };

        Self {
            pos: Vec2::new(x, PROJECTILE_SPAWN_Y),
            vel: Vec2::new(vx, vy),
            radius: PROJECTILE_RADIUS,
            bounds: Vec2::new(width, height),
            released: false,
            off_screen: false,
        }
    }

    /// Whether the projectile has been released and may move
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Whether the projectile has fallen past the bottom edge. Off-screen
    /// projectiles never move again and are removed by the wave.
    pub fn is_off_screen(&self) -> bool {
        self.off_screen
    }

    /// Enable movement. Idempotent and irreversible.
    pub fn release(&mut self) {
        self.released = true;
    }

    /// Advance by `dt` seconds. Waiting projectiles do not translate.
    pub fn advance(&mut self, dt: f32) {
        if self.off_screen {
            return;
        }

        if self.released {
            self.pos += self.vel * dt;

            // Exact elastic reflection at the side walls, not a clamp, so a
            // large dt that overshoots still lands at the mirrored position
            if self.pos.x < self.radius {
                self.pos.x = 2.0 * self.radius - self.pos.x;
                self.vel.x = -self.vel.x;
            }
            if self.pos.x > self.bounds.x - self.radius {
                self.pos.x = 2.0 * (self.bounds.x - self.radius) - self.pos.x;
                self.vel.x = -self.vel.x;
            }
        }

        // The bottom check latches regardless of the released flag
        if self.pos.y - self.radius > self.bounds.y {
            self.off_screen = true;
        }
    }
}
