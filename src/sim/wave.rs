//! Waves of projectiles
//!
//! A wave owns the projectiles for one round of play, split between a
//! waiting set and a released set. Released order is insertion order and
//! doubles as draw order. When both sets are empty the round is over.

use std::collections::VecDeque;

use rand::Rng;

use super::projectile::Projectile;

/// Session-scoped wave numbering. Each constructed wave takes the next
/// number; restarting resets the count so the following wave is 1 again.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveCounter {
    current: u32,
}

impl WaveCounter {
    pub fn new() -> Self {
        Self { current: 0 }
    }

    /// Take the next wave number
    pub fn advance(&mut self) -> u32 {
        self.current += 1;
        self.current
    }

    /// Reset numbering so the next wave is 1
    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn current(&self) -> u32 {
        self.current
    }
}

/// A batch of projectiles for one round of play
#[derive(Debug, Clone)]
pub struct Wave {
    pub(crate) number: u32,
    pub(crate) waiting: VecDeque<Projectile>,
    pub(crate) released: Vec<Projectile>,
}

impl Wave {
    /// Construct a wave of `uniform_int(1..=number) * number` waiting
    /// projectiles, none released. The wave number is threaded in by the
    /// session's counter; the RNG is injected so tests can seed it.
    pub fn new(number: u32, rng: &mut impl Rng, width: f32, height: f32) -> Self {
        debug_assert!(number >= 1);
        let count = rng.random_range(1..=number) * number;
        let waiting = (0..count)
            .map(|_| Projectile::spawn(rng, number, width, height))
            .collect();
        log::debug!("wave {number}: {count} projectiles queued");
        Self {
            number,
            waiting,
            released: Vec::new(),
        }
    }

    /// The wave number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Snapshot of the waiting projectiles
    pub fn waiting(&self) -> Vec<Projectile> {
        self.waiting.iter().cloned().collect()
    }

    /// Snapshot of the released projectiles, in release order
    pub fn released(&self) -> Vec<Projectile> {
        self.released.clone()
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    pub fn released_count(&self) -> usize {
        self.released.len()
    }

    /// True once every projectile has been released and has left the screen
    pub fn is_cleared(&self) -> bool {
        self.waiting.is_empty() && self.released.is_empty()
    }

    /// Move up to `count` projectiles from waiting to released, FIFO,
    /// enabling movement on each as it crosses over
    pub fn release(&mut self, count: usize) {
        for _ in 0..count {
            let Some(mut projectile) = self.waiting.pop_front() else {
                break;
            };
            projectile.release();
            self.released.push(projectile);
        }
    }

    /// Remove off-screen projectiles, then advance the remainder by `dt`
    /// seconds. Removal runs first so a frame never renders an entity that
    /// was flagged on a previous tick.
    pub fn on_tick(&mut self, dt: f32) {
        self.released.retain(|p| !p.is_off_screen());
        for projectile in &mut self.released {
            projectile.advance(dt);
        }
    }
}
