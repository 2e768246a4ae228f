//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Time is injected by the caller (a monotonic `Duration` per advance)
//! - Seeded RNG only, threaded through constructors
//! - Stable iteration order (release order doubles as draw order)
//! - No rendering or platform dependencies

pub mod player;
pub mod projectile;
pub mod session;
pub mod wave;

pub use player::{Direction, Player};
pub use projectile::Projectile;
pub use session::{GameKey, InputEvent, Phase, Session, SessionConfig, Step};
pub use wave::{Wave, WaveCounter};
