//! The player-controlled sprite

use glam::Vec2;

use super::wave::Wave;
use crate::consts::*;

/// Symbolic movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// The player entity. Moves at a fixed speed, is bounds-checked against the
/// screen, and dies on contact with any released projectile.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    speed: f32,
    bounds: Vec2,
}

impl Player {
    /// Player starts horizontally centered, just above the bottom edge
    pub fn new(width: f32, height: f32) -> Self {
        let radius = PLAYER_RADIUS;
        Self {
            pos: Vec2::new(width / 2.0, height - (2.0 * radius + 10.0)),
            radius,
            speed: PLAYER_SPEED,
            bounds: Vec2::new(width, height),
        }
    }

    /// Directional move over `dt` seconds. A move whose guard fails is
    /// rejected outright, never clamped. Left/right/down check the current
    /// edge; up requires a full step of headroom.
    pub fn step(&mut self, dir: Direction, dt: f32) {
        let step = self.speed * dt;
        match dir {
            Direction::Left => {
                if self.pos.x - self.radius >= 0.0 {
                    self.pos.x -= step;
                }
            }
            Direction::Right => {
                if self.pos.x + self.radius < self.bounds.x {
                    self.pos.x += step;
                }
            }
            Direction::Up => {
                if self.pos.y - self.radius >= step {
                    self.pos.y -= step;
                }
            }
            Direction::Down => {
                if self.pos.y + self.radius < self.bounds.y {
                    self.pos.y += step;
                }
            }
        }
    }

    /// Absolute repositioning (mouse-follow). Each axis updates
    /// independently, and only while the circle stays strictly inside the
    /// screen on that axis.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if x - self.radius > 0.0 && x + self.radius < self.bounds.x {
            self.pos.x = x;
        }
        if y - self.radius > 0.0 && y + self.radius < self.bounds.y {
            self.pos.y = y;
        }
    }

    /// True if the player's circle overlaps any released projectile in the
    /// wave. Read-only; works on a snapshot of the released set.
    pub fn has_died(&self, wave: &Wave) -> bool {
        wave.released().iter().any(|p| {
            let hit_dist = p.radius + self.radius;
            p.pos.distance_squared(self.pos) < hit_dist * hit_dist
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player() -> Player {
        Player::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Wave 1 with its single projectile released and moved to `pos`
    fn wave_with_projectile_at(pos: Vec2) -> Wave {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut wave = Wave::new(1, &mut rng, SCREEN_WIDTH, SCREEN_HEIGHT);
        wave.release(1);
        wave.released[0].pos = pos;
        wave
    }

    #[test]
    fn starts_centered_above_the_bottom_edge() {
        let p = player();
        assert_eq!(p.pos, Vec2::new(225.0, 770.0));
    }

    #[test]
    fn blocked_moves_are_rejected_and_idempotent() {
        let mut p = player();
        p.pos.x = p.radius - 1.0;
        for _ in 0..3 {
            p.step(Direction::Left, KEY_STEP_SECS);
        }
        assert_eq!(p.pos.x, p.radius - 1.0);

        let mut p = player();
        p.pos.x = SCREEN_WIDTH - p.radius;
        for _ in 0..3 {
            p.step(Direction::Right, KEY_STEP_SECS);
        }
        assert_eq!(p.pos.x, SCREEN_WIDTH - p.radius);

        let mut p = player();
        p.pos.y = SCREEN_HEIGHT - p.radius;
        p.step(Direction::Down, KEY_STEP_SECS);
        assert_eq!(p.pos.y, SCREEN_HEIGHT - p.radius);
    }

    #[test]
    fn up_requires_a_full_step_of_headroom() {
        let step = PLAYER_SPEED * KEY_STEP_SECS;

        let mut p = player();
        p.pos.y = p.radius + step - 0.1;
        p.step(Direction::Up, KEY_STEP_SECS);
        assert_eq!(p.pos.y, p.radius + step - 0.1);

        let mut p = player();
        p.pos.y = p.radius + step;
        p.step(Direction::Up, KEY_STEP_SECS);
        assert_eq!(p.pos.y, p.radius);
    }

    #[test]
    fn allowed_moves_travel_a_full_step() {
        let mut p = player();
        let start = p.pos;
        let step = PLAYER_SPEED * KEY_STEP_SECS;
        p.step(Direction::Left, KEY_STEP_SECS);
        assert!((p.pos.x - (start.x - step)).abs() < 1e-4);
        p.step(Direction::Right, KEY_STEP_SECS);
        assert!((p.pos.x - start.x).abs() < 1e-4);
    }

    #[test]
    fn absolute_move_uses_strict_bounds_per_axis() {
        let mut p = player();
        let start = p.pos;

        // x - radius == 0 is rejected under the strict check; y updates
        // independently
        p.move_to(p.radius, 400.0);
        assert_eq!(p.pos.x, start.x);
        assert_eq!(p.pos.y, 400.0);

        // y + radius == height is rejected
        p.move_to(100.0, SCREEN_HEIGHT - p.radius);
        assert_eq!(p.pos.x, 100.0);
        assert_eq!(p.pos.y, 400.0);
    }

    #[test]
    fn dies_when_circles_overlap() {
        let p = player();

        // Projectile centered on the player: combined radius 15
        assert!(p.has_died(&wave_with_projectile_at(p.pos)));

        // Just outside the combined radius
        let wave = wave_with_projectile_at(p.pos + Vec2::new(15.5, 0.0));
        assert!(!p.has_died(&wave));

        // Just inside
        let wave = wave_with_projectile_at(p.pos + Vec2::new(14.5, 0.0));
        assert!(p.has_died(&wave));
    }

    #[test]
    fn empty_released_set_never_kills() {
        let mut rng = Pcg32::seed_from_u64(3);
        let wave = Wave::new(2, &mut rng, SCREEN_WIDTH, SCREEN_HEIGHT);
        assert!(!player().has_died(&wave));
    }

    #[test]
    fn waiting_projectiles_do_not_kill() {
        let p = player();
        let mut rng = Pcg32::seed_from_u64(0);
        let mut wave = Wave::new(1, &mut rng, SCREEN_WIDTH, SCREEN_HEIGHT);
        wave.waiting[0].pos = p.pos;
        assert!(!p.has_died(&wave));
    }
}
