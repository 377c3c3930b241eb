//! Per-frame view handed to the presentation layer
//!
//! Field names serialize in camelCase for the JS front end.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::session::GameSession;
use super::state::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarView {
    pub x: f32,
    pub y: f32,
    /// Degrees
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleView {
    pub x: f32,
    pub y: f32,
    pub height: f32,
    pub is_bullish: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub avatar: AvatarView,
    /// Left to right
    pub obstacles: Vec<ObstacleView>,
    pub score: u64,
    pub high_score: u64,
    pub is_game_over: bool,
    pub is_playing: bool,
    pub is_idle: bool,
    pub awaiting_first_input: bool,
    pub frame: u64,
}

impl FrameSnapshot {
    pub fn capture<R: RngCore>(session: &GameSession<R>) -> Self {
        let avatar = session.avatar();
        let phase = session.phase();
        Self {
            avatar: AvatarView {
                x: avatar.pos.x,
                y: avatar.pos.y,
                rotation: avatar.rotation,
            },
            obstacles: session
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    y: o.y,
                    height: o.height,
                    is_bullish: o.trend.is_bullish(),
                })
                .collect(),
            score: session.score(),
            high_score: session.high_score(),
            is_game_over: phase == GamePhase::GameOver,
            is_playing: phase == GamePhase::Playing,
            is_idle: phase == GamePhase::Idle,
            awaiting_first_input: session.awaiting_first_input(),
            frame: session.frame(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
