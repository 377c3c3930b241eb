//! Game tunables and difficulty presets
//!
//! Every constant the simulation reads goes through `GameConfig`, so a front
//! end can ship its own balance as JSON. Configs are checked once when a
//! session is built; the tick loop trusts them afterwards.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Normal,
    Easy,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Normal => "Normal",
            Difficulty::Easy => "Easy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(Difficulty::Normal),
            "easy" => Some(Difficulty::Easy),
            _ => None,
        }
    }

    /// Downward acceleration per tick
    pub fn gravity(&self) -> f32 {
        match self {
            Difficulty::Normal => GRAVITY,
            Difficulty::Easy => GRAVITY_EASY,
        }
    }

    /// Velocity applied by a jump
    pub fn jump_impulse(&self) -> f32 {
        match self {
            Difficulty::Normal => JUMP_IMPULSE,
            Difficulty::Easy => JUMP_IMPULSE_EASY,
        }
    }

    /// Ticks per point
    pub fn score_interval(&self) -> u64 {
        match self {
            Difficulty::Normal => NORMAL_SCORE_INTERVAL,
            Difficulty::Easy => EASY_SCORE_INTERVAL,
        }
    }
}

/// Full tunables surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Preset these values were derived from
    pub difficulty: Difficulty,

    // === Avatar motion ===
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Display degrees per unit of velocity
    pub rotation_gain: f32,

    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub avatar_size: f32,
    pub avatar_x: f32,

    // === Candlesticks ===
    pub obstacle_gap: f32,
    pub obstacle_speed: f32,
    pub obstacle_width: f32,
    pub body_cap: f32,
    pub wick_width: f32,
    pub min_obstacle_height: f32,
    pub obstacle_height_margin: f32,

    // === Cadences (ticks) ===
    pub spawn_interval: u64,
    pub score_interval: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Normal)
    }
}

impl GameConfig {
    /// Build the preset tunables for a difficulty
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,

            gravity: difficulty.gravity(),
            jump_impulse: difficulty.jump_impulse(),
            rotation_gain: ROTATION_GAIN,

            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            avatar_size: AVATAR_SIZE,
            avatar_x: AVATAR_X,

            obstacle_gap: OBSTACLE_GAP,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            body_cap: BODY_CAP,
            wick_width: WICK_WIDTH,
            min_obstacle_height: MIN_OBSTACLE_HEIGHT,
            obstacle_height_margin: OBSTACLE_HEIGHT_MARGIN,

            spawn_interval: SPAWN_INTERVAL,
            score_interval: difficulty.score_interval(),
        }
    }

    pub fn easy() -> Self {
        Self::for_difficulty(Difficulty::Easy)
    }

    /// Lowest y the avatar's top edge can reach (touching the floor)
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.world_height - self.avatar_size
    }

    /// Tallest candlestick the generator may produce
    #[inline]
    pub fn max_obstacle_height(&self) -> f32 {
        self.world_height - self.obstacle_gap - self.obstacle_height_margin
    }

    /// Candlesticks at or left of this x are gone from view
    #[inline]
    pub fn despawn_x(&self) -> f32 {
        -self.obstacle_width
    }

    /// Reject layouts the simulation can't run.
    ///
    /// Gap traversability is not checked: a tall body plus a long wick can
    /// leave less room than the avatar needs, and that stays possible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gravity", self.gravity),
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("avatar_size", self.avatar_size),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_width", self.obstacle_width),
            ("body_cap", self.body_cap),
            ("wick_width", self.wick_width),
        ];
        for (field, value) in positive {
            // Written this way so NaN is rejected too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if !(self.jump_impulse < 0.0) {
            return Err(ConfigError::JumpNotUpward(self.jump_impulse));
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroCadence("spawn_interval"));
        }
        if self.score_interval == 0 {
            return Err(ConfigError::ZeroCadence("score_interval"));
        }
        if self.avatar_size >= self.world_height {
            return Err(ConfigError::AvatarTooLarge {
                avatar: self.avatar_size,
                world: self.world_height,
            });
        }
        if self.wick_width > self.obstacle_width {
            return Err(ConfigError::WickWiderThanBody {
                wick: self.wick_width,
                body: self.obstacle_width,
            });
        }

        let min = self.min_obstacle_height;
        let max = self.max_obstacle_height();
        if !(min >= 0.0 && min <= max) {
            return Err(ConfigError::EmptyHeightRange { min, max });
        }

        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take the values of
    /// the preset named by `difficulty` (Normal when absent).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let parse_err = |e: serde_json::Error| ConfigError::Parse(e.to_string());

        let overrides: serde_json::Value = serde_json::from_str(json).map_err(parse_err)?;
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(ConfigError::Parse("config must be a JSON object".into()));
        };

        let difficulty = match overrides.get("difficulty") {
            Some(value) => Difficulty::deserialize(value).map_err(parse_err)?,
            None => Difficulty::default(),
        };

        // Overlay the user's fields on the chosen preset
        let mut merged =
            serde_json::to_value(Self::for_difficulty(difficulty)).map_err(parse_err)?;
        if let serde_json::Value::Object(base) = &mut merged {
            base.extend(overrides);
        }

        let config: Self = serde_json::from_value(merged).map_err(parse_err)?;
        config.validate()?;
        log::info!("Loaded {} config from JSON", config.difficulty.as_str());
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain floats and ints only, serialization can't fail
        serde_json::to_string(self).unwrap_or_default()
    }
}
