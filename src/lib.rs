//! Bubble Dodge - a wave-based falling-projectile dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projectiles, waves, player, session)
//! - `display`: Display adapter boundary and the minifb framebuffer backend
//! - `settings`: Data-driven window/asset/timing configuration
//! - `error`: Fatal error taxonomy

pub mod display;
pub mod error;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 450.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Projectile radius
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Spawn height, just above the top edge
    pub const PROJECTILE_SPAWN_Y: f32 = -10.0;
    /// Downward speed is uniform in [VY_MIN, VY_MIN + VY_SPREAD)
    pub const PROJECTILE_VY_MIN: f32 = 150.0;
    pub const PROJECTILE_VY_SPREAD: f32 = 500.0;
    /// Horizontal speed magnitude is drawn from [0, VX_SPREAD)
    pub const PROJECTILE_VX_SPREAD: f32 = 600.0;
    /// Extra horizontal drift per wave number
    pub const DRIFT_PER_WAVE: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 750.0;
    /// Time slice applied per directional key event
    pub const KEY_STEP_SECS: f32 = 0.01;

    /// One waiting projectile is released per elapsed interval
    pub const RELEASE_INTERVAL: Duration = Duration::from_millis(150);
    /// Breather between a cleared wave and the next one
    pub const WAVE_PAUSE: Duration = Duration::from_millis(2500);
}
