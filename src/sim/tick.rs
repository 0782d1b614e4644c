//! Fixed timestep simulation tick
//!
//! Order within a tick: input intent -> player physics -> agent patrol ->
//! player/agent hits -> goal check. The controller is the only writer of
//! lives, score and phase.

use serde::{Deserialize, Serialize};

use super::state::{Direction, GameEvent, GamePhase, GameState};

/// Horizontal movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Horizontal {
    #[default]
    Idle,
    Left,
    Right,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub horizontal: Horizontal,
    /// Jump held or pressed this tick
    pub jump: bool,
    /// Restart request; ignored while Running
    pub restart: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        if input.restart {
            state.reset();
        }
        return;
    }

    state.time_ticks += 1;

    apply_intent(state, input);

    state.player.body.advance(&state.platforms, &state.tuning);

    for agent in &mut state.agents {
        agent.advance(&state.platforms, &state.tuning);
    }

    resolve_agent_hits(state);

    if state.phase == GamePhase::Running && state.player.rect().overlaps(&state.goal.rect) {
        state.player.score += state.tuning.goal_bonus;
        state.phase = GamePhase::LevelComplete;
        state.events.push(GameEvent::LevelComplete {
            score: state.player.score,
        });
        log::info!(
            "Level complete after {} ticks, score {}",
            state.time_ticks,
            state.player.score
        );
    }
}

/// Turn intent into player velocity/facing and forward any jump request
fn apply_intent(state: &mut GameState, input: &TickInput) {
    let speed = state.tuning.player_speed;
    let player = &mut state.player;

    player.body.vel.x = match input.horizontal {
        Horizontal::Left => {
            player.facing = Direction::Left;
            -speed
        }
        Horizontal::Right => {
            player.facing = Direction::Right;
            speed
        }
        Horizontal::Idle => 0.0,
    };

    if input.jump && player.body.jump(state.tuning.jump_strength) {
        state.events.push(GameEvent::Jumped);
    }
}

/// First overlapping agent (creation order) costs one life; the rest are
/// not checked this tick.
fn resolve_agent_hits(state: &mut GameState) {
    let player_rect = *state.player.rect();
    if !state.agents.iter().any(|a| a.rect.overlaps(&player_rect)) {
        return;
    }

    let player = &mut state.player;
    player.lives = player.lives.saturating_sub(1);
    player.respawn(state.layout.player_spawn);
    state.events.push(GameEvent::PlayerHit {
        lives_left: player.lives,
    });

    if player.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Game over after {} ticks, score {}",
            state.time_ticks,
            player.score
        );
    }
}
