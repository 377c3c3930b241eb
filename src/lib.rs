//! Candle Flap - a flappy arcade game through candlestick charts
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `driver`: Frame scheduling that drives the simulation
//! - `config`: Tunables and difficulty presets
//! - `web`: Browser bindings (wasm32 only)

pub mod config;
pub mod driver;
pub mod error;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{Difficulty, GameConfig};
pub use driver::{FrameHandle, FrameScheduler, GameLoop, ManualScheduler};
pub use error::{ConfigError, SchedulerError};
pub use sim::{FrameSnapshot, GameEvent, GamePhase, GameSession};

/// Game configuration constants
///
/// Units are pixels and ticks. One tick is one rendered frame.
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Downward acceleration per tick (normal / easy)
    pub const GRAVITY: f32 = 0.5;
    pub const GRAVITY_EASY: f32 = 0.35;
    /// Velocity set by a jump, negative is up (normal / easy)
    pub const JUMP_IMPULSE: f32 = -10.0;
    pub const JUMP_IMPULSE_EASY: f32 = -8.0;

    /// Avatar box and starting column
    pub const AVATAR_SIZE: f32 = 24.0;
    pub const AVATAR_X: f32 = 100.0;
    /// Display degrees of tilt per unit of velocity
    pub const ROTATION_GAIN: f32 = 4.0;

    /// Candlestick geometry
    pub const OBSTACLE_GAP: f32 = 200.0;
    pub const OBSTACLE_WIDTH: f32 = 64.0;
    pub const BODY_CAP: f32 = 100.0;
    pub const WICK_WIDTH: f32 = 8.0;
    pub const MIN_OBSTACLE_HEIGHT: f32 = 50.0;
    /// Subtracted from (world height - gap) to get the tallest candlestick
    pub const OBSTACLE_HEIGHT_MARGIN: f32 = 100.0;
    /// Leftward scroll per tick
    pub const OBSTACLE_SPEED: f32 = 3.0;

    /// Cadences in ticks
    pub const SPAWN_INTERVAL: u64 = 100;
    pub const NORMAL_SCORE_INTERVAL: u64 = 50;
    pub const EASY_SCORE_INTERVAL: u64 = 100;
}
