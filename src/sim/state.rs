//! Core simulation types
//!
//! Entities owned by a `GameSession`. The presentation layer only ever sees
//! these through a `FrameSnapshot`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Run in progress (possibly still waiting for the first jump)
    Playing,
    /// Run ended, waiting for a restart
    GameOver,
}

/// Candlestick orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    /// Body sits on the floor, wick points up
    Bullish,
    /// Body hangs from the ceiling, wick points down
    Bearish,
}

impl Trend {
    pub fn is_bullish(&self) -> bool {
        matches!(self, Trend::Bullish)
    }
}

/// The player-controlled bird
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner; x never changes during a run
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vel_y: f32,
    /// Display tilt in degrees
    pub rotation: f32,
    /// Side of the square bounding box
    pub size: f32,
}

impl Avatar {
    /// Starting pose: fixed column, vertically centered, at rest
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.avatar_x, config.world_height / 2.0),
            vel_y: 0.0,
            rotation: 0.0,
            size: config.avatar_size,
        }
    }
}

/// A candlestick obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge, scrolls toward zero
    pub x: f32,
    /// Offset of the anchored end from its wall
    pub y: f32,
    /// Full body + wick length
    pub height: f32,
    pub trend: Trend,
}

impl Obstacle {
    /// Length of the solid part
    #[inline]
    pub fn body_height(&self, body_cap: f32) -> f32 {
        self.height.min(body_cap)
    }

    /// Length of the thin part beyond the body
    #[inline]
    pub fn wick_height(&self, body_cap: f32) -> f32 {
        (self.height - self.body_height(body_cap)).max(0.0)
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Fell to the bottom of the world
    Floor,
    /// Touched a candlestick body or wick
    Obstacle,
}

/// Things the presentation layer may want to react to (sounds, toasts)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began
    Started,
    /// First jump of the run; physics are live from here
    FirstInput,
    /// Any accepted jump
    Jumped,
    /// A candlestick entered on the right edge
    Spawned { x: f32, height: f32, trend: Trend },
    /// Score went up
    Scored { score: u64 },
    /// Run ended
    GameOver {
        score: u64,
        high_score: u64,
        cause: CrashCause,
    },
}
