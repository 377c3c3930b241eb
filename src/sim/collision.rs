//! Collision detection between the avatar and candlesticks
//!
//! A candlestick is two axis-aligned boxes: the wide body anchored to the
//! floor (bullish) or ceiling (bearish), and a narrow centered wick that
//! continues past the body away from its anchor. The avatar hits if it
//! overlaps either box. Touching edges is not a hit.

use glam::Vec2;

use super::state::{Avatar, Obstacle, Trend};
use crate::config::GameConfig;

/// Axis-aligned box in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: all four separating conditions must fail
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

impl Avatar {
    /// Bounding box at the current position
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// Solid part of a candlestick
pub fn body_rect(obstacle: &Obstacle, config: &GameConfig) -> Aabb {
    let body = obstacle.body_height(config.body_cap);
    let top = match obstacle.trend {
        Trend::Bullish => config.world_height - obstacle.y - body,
        Trend::Bearish => obstacle.y,
    };
    Aabb::new(obstacle.x, top, config.obstacle_width, body)
}

/// Thin part of a candlestick, flush against the body's free end
pub fn wick_rect(obstacle: &Obstacle, config: &GameConfig) -> Aabb {
    let body = obstacle.body_height(config.body_cap);
    let wick = obstacle.wick_height(config.body_cap);
    let top = match obstacle.trend {
        Trend::Bullish => config.world_height - obstacle.y - obstacle.height,
        Trend::Bearish => obstacle.y + body,
    };
    let x = obstacle.x + (config.obstacle_width - config.wick_width) / 2.0;
    Aabb::new(x, top, config.wick_width, wick)
}

/// Check whether a box hits either part of a candlestick
pub fn hits_obstacle(avatar: &Aabb, obstacle: &Obstacle, config: &GameConfig) -> bool {
    avatar.overlaps(&body_rect(obstacle, config)) || avatar.overlaps(&wick_rect(obstacle, config))
}

/// Index of the first candlestick (in spawn order) the avatar hits
pub fn first_hit(avatar: &Avatar, obstacles: &[Obstacle], config: &GameConfig) -> Option<usize> {
    let bounds = avatar.aabb();
    obstacles
        .iter()
        .position(|obstacle| hits_obstacle(&bounds, obstacle, config))
}
