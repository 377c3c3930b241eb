//! Per-tick motion
//!
//! Discrete constant-acceleration steps tuned for feel. The avatar moves by
//! the velocity it had at the start of the tick, then gravity is added, so
//! the displayed tilt lags one tick behind the new velocity.

use super::state::{Avatar, Obstacle};
use crate::config::GameConfig;

/// Where the avatar ended up after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Airborne,
    /// Clamped onto the floor; the run is lost
    HitFloor,
}

/// Advance the avatar by one tick.
///
/// Position uses the pre-step velocity and is clamped to `[0, floor_y]`.
/// On a floor contact the avatar is left where it landed and velocity and
/// tilt are not updated.
pub fn step_avatar(avatar: &mut Avatar, config: &GameConfig) -> StepOutcome {
    let vel = avatar.vel_y;
    let floor = config.floor_y();

    avatar.pos.y = (avatar.pos.y + vel).clamp(0.0, floor);
    if avatar.pos.y >= floor {
        return StepOutcome::HitFloor;
    }

    avatar.vel_y = vel + config.gravity;
    avatar.rotation = vel * config.rotation_gain;
    StepOutcome::Airborne
}

/// Scroll candlesticks left and drop the ones fully off screen.
///
/// Everything moves at the same speed, so spawn order stays left-to-right
/// order.
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, config: &GameConfig) {
    let despawn_x = config.despawn_x();
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= config.obstacle_speed;
    }
    obstacles.retain(|o| o.x > despawn_x);
}
