//! Error types for plume.
//!
//! Normal operation raises no errors: out-of-capacity spawns are silently
//! throttled (documented rate limiting, not a failure). Errors cover the
//! two genuinely fatal conditions — a configuration that would corrupt
//! capacity or jitter math, and an update thread that fails to start or
//! refuses to exit within the teardown grace period.

use std::fmt;

/// Errors surfaced by [`Emitter`](crate::Emitter) setup and teardown.
#[derive(Debug)]
pub enum EmitterError {
    /// Lifespan must be finite and strictly positive.
    InvalidLifespan(f32),
    /// Emission rate must be finite and non-negative.
    InvalidEmissionRate(f32),
    /// Target frame rate must be finite and strictly positive.
    InvalidFrameRate(f32),
    /// A numeric configuration field was NaN or infinite; carries the
    /// field name.
    NonFiniteConfig(&'static str),
    /// The OS refused to spawn the update thread.
    UpdateThread(std::io::Error),
    /// The update thread did not confirm exit within the grace period.
    /// Shared state may still be touched by the loop; treat as a logic
    /// error, not something to swallow.
    ShutdownTimeout,
}

impl fmt::Display for EmitterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitterError::InvalidLifespan(v) => {
                write!(f, "particle lifespan must be positive, got {}", v)
            }
            EmitterError::InvalidEmissionRate(v) => {
                write!(f, "emission rate must be non-negative, got {}", v)
            }
            EmitterError::InvalidFrameRate(v) => {
                write!(f, "target frame rate must be positive, got {}", v)
            }
            EmitterError::NonFiniteConfig(field) => {
                write!(f, "configuration field `{}` is not finite", field)
            }
            EmitterError::UpdateThread(e) => {
                write!(f, "failed to spawn update thread: {}", e)
            }
            EmitterError::ShutdownTimeout => {
                write!(
                    f,
                    "update thread did not exit within the shutdown grace period"
                )
            }
        }
    }
}

impl std::error::Error for EmitterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmitterError::UpdateThread(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EmitterError {
    fn from(e: std::io::Error) -> Self {
        EmitterError::UpdateThread(e)
    }
}
