//! Display adapter boundary
//!
//! The simulation never talks to a window directly; the game loop consumes
//! this trait. `window::WindowDisplay` is the minifb framebuffer backend;
//! tests substitute scripted stand-ins.

pub mod window;

pub use window::WindowDisplay;

use glam::Vec2;

use crate::error::Result;
use crate::sim::{InputEvent, Session};

/// Keyed sprite identifiers; no positional indexing anywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Background,
    Player,
    Projectile,
}

/// Axis-aligned square destination for an entity sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRect {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl SpriteRect {
    /// Square covering a circle at `center` with the given radius
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self {
            x: center.x - radius,
            y: center.y - radius,
            size: 2.0 * radius,
        }
    }
}

/// Everything drawn in one frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub player: SpriteRect,
    /// In release order, which is also draw order
    pub projectiles: Vec<SpriteRect>,
}

impl Scene {
    /// Snapshot the session state the display needs this frame
    pub fn capture(session: &Session) -> Self {
        let player = session.player();
        Self {
            player: SpriteRect::around(player.pos, player.radius),
            projectiles: session
                .wave()
                .released()
                .iter()
                .map(|p| SpriteRect::around(p.pos, p.radius))
                .collect(),
        }
    }
}

/// The display surface consumed by the game loop
pub trait DisplayAdapter {
    /// Drain pending input events; non-blocking
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Draw one frame: background, projectiles in order, then the player
    fn present(&mut self, scene: &Scene) -> Result<()>;

    /// Terminal closed flag, set by `close` or by the window going away
    fn is_closed(&self) -> bool;

    /// Tear down the window resources. Idempotent; safe from error paths
    /// and destructors.
    fn close(&mut self);
}
