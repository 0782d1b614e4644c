//! Game state and core simulation types
//!
//! [`GameState`] is the simulation controller's storage: it owns every
//! entity and the phase. Nothing here holds a reference to anything else;
//! collaborators are passed into update calls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::kinematics::Body;
use super::level::LevelLayout;
use super::patrol::PatrolAgent;
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::settings::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// Lives ran out
    GameOver,
    /// Player reached the goal
    LevelComplete,
}

/// Horizontal heading, shared by player facing and agent patrol direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// -1.0 for left, +1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Things that happened during a tick, drained by the shell for logging/HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A jump actually left the ground
    Jumped,
    /// The player touched an agent and was sent back to spawn
    PlayerHit { lives_left: u32 },
    GameOver,
    LevelComplete { score: u64 },
    Reset,
}

/// Static level geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// Level exit. Overlapping it completes the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalZone {
    pub rect: Rect,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Last horizontal direction the player moved in (sprite mirroring)
    pub facing: Direction,
    pub score: u64,
    pub lives: u32,
}

impl Player {
    /// New player centred on `spawn`, at rest, not grounded
    pub fn new(spawn: Vec2, lives: u32) -> Self {
        Self {
            body: Body::new(Rect::from_center(spawn, PLAYER_WIDTH, PLAYER_HEIGHT)),
            facing: Direction::Right,
            score: 0,
            lives,
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    /// Teleport back to spawn. Velocity is deliberately left untouched.
    pub fn respawn(&mut self, spawn: Vec2) {
        self.body.rect.set_center(spawn);
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the level was built from
    pub seed: u64,
    /// Injected physics/rules configuration
    pub tuning: Tuning,
    /// Resolved level data; resets rebuild entities from this
    pub layout: LevelLayout,
    /// Level number shown on the HUD (single level, always 1)
    pub level: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Running ticks advanced since the last reset
    pub time_ticks: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    /// Patrol agents in creation order (hit checks follow this order)
    pub agents: Vec<PatrolAgent>,
    pub goal: GoalZone,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Reference level with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Reference level with the given tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let layout = LevelLayout::reference(seed);
        Self::from_layout(layout, tuning)
    }

    /// Build the controller for an arbitrary layout
    pub fn from_layout(layout: LevelLayout, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "tuning out of range");
        log::debug!(
            "Level built: {} platforms, {} agents, seed {}",
            layout.platforms.len(),
            layout.agents.len(),
            layout.seed
        );
        Self {
            seed: layout.seed,
            player: Player::new(layout.player_spawn, tuning.starting_lives),
            platforms: layout.platforms.iter().copied().map(Platform::new).collect(),
            agents: layout.agents.iter().map(PatrolAgent::from_spawn).collect(),
            goal: GoalZone { rect: layout.goal },
            level: 1,
            phase: GamePhase::Running,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
            layout,
        }
    }

    /// Full re-initialization back to Running: fresh player, agents back on
    /// their spawn list, goal recreated.
    pub fn reset(&mut self) {
        let layout = self.layout.clone();
        let tuning = self.tuning.clone();
        let events = std::mem::take(&mut self.events);
        *self = Self::from_layout(layout, tuning);
        self.events = events;
        self.events.push(GameEvent::Reset);
        log::info!("Level reset (seed {})", self.seed);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_running_with_full_lives() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.rect().center(), Vec2::new(100.0, 400.0));
        assert_eq!(state.platforms.len(), 8);
        assert_eq!(state.agents.len(), 4);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_respawn_keeps_velocity() {
        let mut player = Player::new(Vec2::new(100.0, 400.0), 3);
        player.body.rect.translate(Vec2::new(300.0, 50.0));
        player.body.vel = Vec2::new(5.0, 3.5);
        player.respawn(Vec2::new(100.0, 400.0));
        assert_eq!(player.rect().center(), Vec2::new(100.0, 400.0));
        assert_eq!(player.body.vel, Vec2::new(5.0, 3.5));
    }

    #[test]
    fn test_reset_restores_layout() {
        let mut state = GameState::new(42);
        let original_agents = state.agents.clone();
        state.player.lives = 0;
        state.player.score = 1000;
        state.phase = GamePhase::GameOver;
        state.agents[0].rect.translate(Vec2::new(40.0, 0.0));
        state.agents[0].direction = state.agents[0].direction.reversed();

        state.reset();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.agents, original_agents);
        assert_eq!(state.drain_events(), vec![GameEvent::Reset]);
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(Direction::Left.sign(), -1.0);
        assert_eq!(Direction::Right.sign(), 1.0);
        assert_eq!(Direction::Left.reversed(), Direction::Right);
    }

    #[test]
    fn test_state_serializes_without_events() {
        let mut state = GameState::new(3);
        state.events.push(GameEvent::Jumped);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert!(back.events.is_empty());
        assert_eq!(back.player, state.player);
        assert_eq!(back.agents, state.agents);
    }
}
