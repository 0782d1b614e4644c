//! Simulation tuning
//!
//! Everything the simulation would otherwise read from process-wide
//! constants is injected through [`Tuning`], so tests can run the core with
//! any world size or physics without touching a display.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and rules configuration handed to the simulation at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Logical world width (horizontal clamp bound)
    pub world_width: f32,
    /// Logical world height (used by touch zones and the renderer)
    pub world_height: f32,

    // === Player ===
    /// Downward acceleration added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_strength: f32,
    /// Horizontal speed while a direction is held
    pub player_speed: f32,
    /// Lives at the start of a level
    pub starting_lives: u32,

    // === Agents ===
    /// How far below an agent the ground probe looks
    pub agent_probe_drop: f32,

    // === Rules ===
    /// Score awarded on reaching the goal
    pub goal_bonus: u64,

    // === Loop ===
    /// Logical ticks per second
    pub tick_rate: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            player_speed: PLAYER_SPEED,
            starting_lives: STARTING_LIVES,

            agent_probe_drop: AGENT_PROBE_DROP,

            goal_bonus: GOAL_BONUS,

            tick_rate: TICK_RATE,
        }
    }
}

/// Why a tuning file was rejected
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    /// The file is not valid JSON for [`Tuning`]
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep their
    /// reference defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Pretty JSON, as written by the native `--write-tuning` flag
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            self.world_width,
            self.world_height,
            self.gravity,
            self.jump_strength,
            self.player_speed,
            self.agent_probe_drop,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(TuningError::Invalid("all values must be finite"));
        }
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(TuningError::Invalid("world size must be positive"));
        }
        if self.gravity <= 0.0 {
            return Err(TuningError::Invalid("gravity must pull downward"));
        }
        if self.jump_strength >= 0.0 {
            return Err(TuningError::Invalid("jump strength must be negative (upward)"));
        }
        if self.player_speed < 0.0 {
            return Err(TuningError::Invalid("player speed must not be negative"));
        }
        if self.tick_rate == 0 {
            return Err(TuningError::Invalid("tick rate must be at least 1"));
        }
        Ok(())
    }

    /// Duration of one tick in seconds
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}
