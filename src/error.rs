//! Fatal error taxonomy
//!
//! Asset-load failures are absorbed at the display boundary (logged, flat
//! placeholder sprite); everything here tears the display down and unwinds
//! to the top-level handler in `main`, which logs and exits nonzero.

use thiserror::Error;

/// Errors that end the session
#[derive(Debug, Error)]
pub enum GameError {
    /// Window creation failed at startup
    #[error("display initialization failed: {0}")]
    Init(String),

    /// A mid-session present/draw call failed
    #[error("failed to present a frame: {0}")]
    Render(String),
}

/// Result type for fallible display operations
pub type Result<T> = std::result::Result<T, GameError>;
