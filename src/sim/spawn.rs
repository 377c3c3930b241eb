//! Candlestick generation
//!
//! One candlestick every `spawn_interval` ticks, entering at the right edge
//! with a random height and a coin-flip orientation. Heights are bounded but
//! not checked against the avatar, so an unpassable pairing can happen.

use rand::{Rng, RngCore};

use super::state::{Obstacle, Trend};
use crate::config::GameConfig;

/// True on the ticks where a candlestick should appear
#[inline]
pub fn spawn_due(frame: u64, config: &GameConfig) -> bool {
    frame > 0 && frame.is_multiple_of(config.spawn_interval)
}

/// Roll a new candlestick at the right edge of the world
pub fn spawn_obstacle<R: RngCore>(config: &GameConfig, rng: &mut R) -> Obstacle {
    let height = rng.random_range(config.min_obstacle_height..=config.max_obstacle_height());
    let trend = if rng.random_bool(0.5) {
        Trend::Bullish
    } else {
        Trend::Bearish
    };

    Obstacle {
        x: config.world_width,
        y: 0.0,
        height,
        trend,
    }
}
