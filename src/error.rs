//! Error types
//!
//! The simulation itself never fails: losing is a game phase, and commands
//! that don't apply are no-ops. Errors only come from building a config or
//! from the host refusing to schedule a frame.

use thiserror::Error;

/// Rejected tunables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// A quantity that must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// Jumps must push the avatar up (negative velocity)
    #[error("jump impulse must be negative (upward), got {0}")]
    JumpNotUpward(f32),

    /// A tick cadence of zero would never fire
    #[error("{0} must be at least one tick")]
    ZeroCadence(&'static str),

    /// The random candlestick height range is empty
    #[error("obstacle height range is empty: min {min} > max {max}")]
    EmptyHeightRange { min: f32, max: f32 },

    /// Avatar cannot fit inside the world
    #[error("avatar size {avatar} does not fit a world of height {world}")]
    AvatarTooLarge { avatar: f32, world: f32 },

    /// Wick must sit inside the body horizontally
    #[error("wick width {wick} exceeds obstacle width {body}")]
    WickWiderThanBody { wick: f32, body: f32 },
}

/// Host-side scheduling failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// No frame clock available (no window, or the request was refused)
    #[error("frame scheduler unavailable: {0}")]
    Unavailable(String),
}
