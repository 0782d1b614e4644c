//! Ledge Runner - a single-screen platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, patrol AI, game state)
//! - `input`: Raw key/touch signals collapsed into per-tick intent
//! - `autopilot`: Demo pilot that plays the level
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Injected tuning (world bounds, physics, rules)

pub mod autopilot;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Tuning, TuningError};

/// Game configuration constants (reference values; the simulation reads
/// them through [`Tuning`] or [`sim::LevelLayout`])
pub mod consts {
    /// Logical ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player physics (per tick)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_STRENGTH: f32 = -12.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const STARTING_LIVES: u32 = 3;

    /// Entity sizes
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const AGENT_WIDTH: f32 = 35.0;
    pub const AGENT_HEIGHT: f32 = 50.0;
    pub const GOAL_WIDTH: f32 = 60.0;
    pub const GOAL_HEIGHT: f32 = 80.0;

    /// Agent pace range (inclusive, pixels per tick)
    pub const AGENT_MIN_SPEED: u32 = 2;
    pub const AGENT_MAX_SPEED: u32 = 4;
    /// How far below an agent its ground probe looks
    pub const AGENT_PROBE_DROP: f32 = 2.0;

    /// Score for reaching the goal
    pub const GOAL_BONUS: u64 = 1000;

    /// Number of player outfit colours
    pub const OUTFIT_COUNT: u8 = 4;

    /// Touch control button size
    pub const TOUCH_BUTTON_SIZE: f32 = 60.0;
}
