//! Level layout
//!
//! A layout is plain data handed to the controller at construction. Random
//! choices (agent heading and pace, outfit colour) are resolved here, once,
//! from the run seed, so a reset replays the exact same level.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::Direction;
use crate::consts::*;

/// Where and how a patrol agent starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentSpawn {
    pub rect: Rect,
    pub direction: Direction,
    pub speed: f32,
}

/// Fully resolved level data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Seed used for the random choices below
    pub seed: u64,
    /// Platform rects in draw/collision order
    pub platforms: Vec<Rect>,
    /// Agent spawn list in creation order
    pub agents: Vec<AgentSpawn>,
    pub goal: Rect,
    /// Player centre at start and after every hit
    pub player_spawn: Vec2,
    /// Cosmetic outfit colour index (renderer palette)
    pub outfit: u8,
}

/// Reference platforms as (x, y, width, height), top-left origin
const REFERENCE_PLATFORMS: [(f32, f32, f32, f32); 8] = [
    (0.0, 500.0, 800.0, 100.0), // ground
    (100.0, 400.0, 200.0, 20.0),
    (400.0, 300.0, 150.0, 20.0),
    (200.0, 200.0, 150.0, 20.0),
    (600.0, 350.0, 150.0, 20.0),
    (50.0, 150.0, 100.0, 20.0),
    (500.0, 150.0, 100.0, 20.0),
    (700.0, 250.0, 100.0, 20.0),
];

/// Reference agents as (centre x, feet y). Feet rest on the platform top
/// below each spawn point.
const REFERENCE_AGENTS: [(f32, f32); 4] = [
    (300.0, 500.0),
    (550.0, 300.0),
    (150.0, 150.0),
    (450.0, 500.0),
];

const REFERENCE_GOAL_CENTER: Vec2 = Vec2::new(750.0, 420.0);
const REFERENCE_PLAYER_SPAWN: Vec2 = Vec2::new(100.0, 400.0);

impl LevelLayout {
    /// The single hardcoded level
    pub fn reference(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let platforms = REFERENCE_PLATFORMS
            .iter()
            .map(|&(x, y, w, h)| Rect::new(x, y, w, h))
            .collect();

        let agents = REFERENCE_AGENTS
            .iter()
            .map(|&(cx, feet)| {
                let mut rect = Rect::from_center(Vec2::new(cx, feet), AGENT_WIDTH, AGENT_HEIGHT);
                rect.set_bottom(feet);
                let direction = if rng.random_bool(0.5) {
                    Direction::Right
                } else {
                    Direction::Left
                };
                let speed = rng.random_range(AGENT_MIN_SPEED..=AGENT_MAX_SPEED) as f32;
                AgentSpawn {
                    rect,
                    direction,
                    speed,
                }
            })
            .collect();

        let outfit = rng.random_range(0..OUTFIT_COUNT);

        Self {
            seed,
            platforms,
            agents,
            goal: Rect::from_center(REFERENCE_GOAL_CENTER, GOAL_WIDTH, GOAL_HEIGHT),
            player_spawn: REFERENCE_PLAYER_SPAWN,
            outfit,
        }
    }
}
