//! Demo controller for headless runs and attract mode
//!
//! Steers toward the middle of the nearest opening: away from the body of
//! the next candlestick and its wick. Not a perfect player.

use rand::RngCore;

use super::collision::{body_rect, wick_rect};
use super::session::GameSession;
use super::state::Trend;

/// Decide whether to jump before the next tick
pub fn should_jump<R: RngCore>(session: &GameSession<R>) -> bool {
    if !session.is_playing() {
        return false;
    }
    if session.awaiting_first_input() {
        return true;
    }

    let avatar = session.avatar();
    let target = target_altitude(session);

    // Only flap while sinking below the target, so jumps don't stack
    avatar.pos.y + avatar.size / 2.0 > target && avatar.vel_y > 0.0
}

/// Center line of the open space beside the next candlestick ahead
fn target_altitude<R: RngCore>(session: &GameSession<R>) -> f32 {
    let config = session.config();
    let avatar = session.avatar();
    let next = session
        .obstacles()
        .iter()
        .find(|o| o.x + config.obstacle_width >= avatar.pos.x);

    let Some(obstacle) = next else {
        return config.world_height / 2.0;
    };

    let body = body_rect(obstacle, config);
    let wick = wick_rect(obstacle, config);
    match obstacle.trend {
        // Blocked from the floor up to the wick tip
        Trend::Bullish => wick.min.y.min(body.min.y) / 2.0,
        // Blocked from the ceiling down to the wick tip
        Trend::Bearish => {
            let open_top = wick.max().y.max(body.max().y);
            (open_top + config.world_height) / 2.0
        }
    }
}
