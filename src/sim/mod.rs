//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, no wall-clock reads
//! - Injected RNG only
//! - Spawn-ordered candlesticks
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod state;

pub use collision::{Aabb, body_rect, first_hit, hits_obstacle, wick_rect};
pub use physics::{StepOutcome, advance_obstacles, step_avatar};
pub use session::GameSession;
pub use snapshot::{AvatarView, FrameSnapshot, ObstacleView};
pub use spawn::{spawn_due, spawn_obstacle};
pub use state::{Avatar, CrashCause, GameEvent, GamePhase, Obstacle, Trend};
