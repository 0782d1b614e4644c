//! Demo pilot
//!
//! Plays the level from a read-only view of the state: head for the goal,
//! hop over agents coming up ahead and over gaps at platform edges. Used by
//! the native headless runner and the browser idle mode.

use glam::Vec2;

use crate::input::ControlState;
use crate::sim::{Direction, GameState};

/// Horizontal distance at which an approaching agent triggers a jump
const THREAT_RANGE: f32 = 70.0;
/// Dead zone around the goal centre where the pilot stops steering
const GOAL_DEAD_ZONE: f32 = 5.0;
/// How many player steps ahead the gap probe looks
const GAP_LOOKAHEAD_STEPS: f32 = 3.0;

/// Produce this frame's controls
pub fn pilot(state: &GameState) -> ControlState {
    let mut controls = ControlState::default();

    if !state.is_running() {
        controls.restart_pressed = true;
        return controls;
    }

    let player = state.player.rect();
    let target = state.goal.rect.center().x;
    let x = player.center().x;

    let heading = if x < target - GOAL_DEAD_ZONE {
        controls.move_right = true;
        Direction::Right
    } else if x > target + GOAL_DEAD_ZONE {
        controls.move_left = true;
        Direction::Left
    } else {
        state.player.facing
    };

    if state.player.body.on_ground && (agent_ahead(state, heading) || gap_ahead(state, heading)) {
        controls.jump_pressed = true;
    }

    controls
}

/// An agent in the player's height band within jumping range ahead
fn agent_ahead(state: &GameState, heading: Direction) -> bool {
    let player = state.player.rect();
    state.agents.iter().any(|agent| {
        let same_band = agent.rect.top() < player.bottom() && agent.rect.bottom() > player.top();
        let gap = match heading {
            Direction::Right => agent.rect.left() - player.right(),
            Direction::Left => player.left() - agent.rect.right(),
        };
        same_band && (0.0..THREAT_RANGE).contains(&gap)
    })
}

/// Nothing underfoot a few steps ahead
fn gap_ahead(state: &GameState, heading: Direction) -> bool {
    let step = heading.sign() * state.tuning.player_speed * GAP_LOOKAHEAD_STEPS;
    let probe = state.player.rect().translated(Vec2::new(step, 2.0));
    !state.platforms.iter().any(|p| probe.overlaps(&p.rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::{AgentSpawn, GamePhase, LevelLayout, Rect, TickInput, tick};

    fn layout(agents: Vec<AgentSpawn>) -> LevelLayout {
        LevelLayout {
            seed: 0,
            platforms: vec![Rect::new(0.0, 500.0, 800.0, 100.0)],
            agents,
            goal: Rect::new(720.0, 380.0, 60.0, 80.0),
            player_spawn: Vec2::new(100.0, 470.0),
            outfit: 0,
        }
    }

    fn grounded(layout: LevelLayout) -> GameState {
        let mut state = GameState::from_layout(layout, Tuning::default());
        tick(&mut state, &TickInput::default());
        assert!(state.player.body.on_ground);
        state
    }

    #[test]
    fn test_heads_for_goal() {
        let state = grounded(layout(vec![]));
        let controls = pilot(&state);
        assert!(controls.move_right);
        assert!(!controls.move_left);
        assert!(!controls.jump_pressed);
    }

    #[test]
    fn test_jumps_over_agent_ahead() {
        let agent = AgentSpawn {
            rect: Rect::new(160.0, 450.0, 35.0, 50.0),
            direction: Direction::Left,
            speed: 2.0,
        };
        let state = grounded(layout(vec![agent]));
        assert!(pilot(&state).jump_pressed);
    }

    #[test]
    fn test_ignores_agent_behind() {
        let agent = AgentSpawn {
            rect: Rect::new(10.0, 450.0, 35.0, 50.0),
            direction: Direction::Left,
            speed: 2.0,
        };
        let state = grounded(layout(vec![agent]));
        assert!(!pilot(&state).jump_pressed);
    }

    #[test]
    fn test_jumps_at_gap() {
        let mut l = layout(vec![]);
        l.platforms = vec![Rect::new(0.0, 500.0, 90.0, 100.0)];
        let state = grounded(l);
        assert!(pilot(&state).jump_pressed);
    }

    #[test]
    fn test_requests_restart_when_over() {
        let mut state = grounded(layout(vec![]));
        state.phase = GamePhase::GameOver;
        assert!(pilot(&state).restart_pressed);
    }

    #[test]
    fn test_reaches_goal_on_open_floor() {
        let mut state = GameState::from_layout(layout(vec![]), Tuning::default());
        for _ in 0..400 {
            let controls = pilot(&state);
            tick(&mut state, &controls.intent());
            if state.phase == GamePhase::LevelComplete {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.player.score, 1000);
    }
}
