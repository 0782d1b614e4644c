//! Full-tick scenarios on the reference level, driven through the public API

use glam::Vec2;

use ledge_runner::Tuning;
use ledge_runner::autopilot;
use ledge_runner::sim::{
    GameEvent, GamePhase, GameState, Horizontal, LevelLayout, Rect, TickInput, tick,
};

const SEED: u64 = 2024;

fn idle() -> TickInput {
    TickInput::default()
}

/// Put the player on the ground floor with its centre at `x`
fn stand_on_ground(state: &mut GameState, x: f32) {
    let rect = &mut state.player.body.rect;
    rect.set_center(Vec2::new(x, 0.0));
    rect.set_bottom(500.0);
    state.player.body.vel = Vec2::ZERO;
}

#[test]
fn test_spawn_settles_onto_first_ledge() {
    let mut state = GameState::new(SEED);
    // Spawn rect pokes 30px into the ledge at y=400; falling resolution lifts it out
    assert!(state.player.rect().overlaps(&state.platforms[1].rect));

    tick(&mut state, &idle());

    assert_eq!(state.player.rect().bottom(), 400.0);
    assert_eq!(state.player.body.vel.y, 0.0);
    assert!(state.player.body.on_ground);
}

#[test]
fn test_open_air_tick_adds_gravity_once() {
    let layout = LevelLayout {
        platforms: vec![Rect::new(0.0, 500.0, 800.0, 100.0)],
        agents: vec![],
        ..LevelLayout::reference(SEED)
    };
    let mut state = GameState::from_layout(layout, Tuning::default());
    let y0 = state.player.rect().top();

    tick(&mut state, &idle());

    assert_eq!(state.player.body.vel.y, 0.5);
    assert_eq!(state.player.rect().top(), y0 + 0.5);
    assert!(!state.player.body.on_ground);
}

#[test]
fn test_agents_hold_their_platforms() {
    let mut state = GameState::new(SEED);
    let spawn_floor: Vec<Rect> = state
        .agents
        .iter()
        .map(|a| {
            let feet = a.rect.translated(Vec2::new(0.0, 2.0));
            state
                .platforms
                .iter()
                .find(|p| p.rect.overlaps(&feet))
                .map(|p| p.rect)
                .expect("agent spawned on a platform")
        })
        .collect();
    let heights: Vec<f32> = state.agents.iter().map(|a| a.rect.y).collect();

    for _ in 0..2000 {
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Running);
        for ((agent, floor), y) in state.agents.iter().zip(&spawn_floor).zip(&heights) {
            assert_eq!(agent.rect.y, *y);
            assert!(agent.rect.right() > floor.left());
            assert!(agent.rect.left() < floor.right());
            assert!(agent.rect.left() >= 0.0 && agent.rect.right() <= 800.0);
        }
    }
}

#[test]
fn test_last_life_lost_to_agent() {
    let mut state = GameState::new(SEED);
    state.player.lives = 1;
    let target = state.agents[0].rect.center().x;
    stand_on_ground(&mut state, target);

    tick(&mut state, &idle());

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.player.lives, 0);
    assert_eq!(state.player.rect().center(), Vec2::new(100.0, 400.0));
    let events = state.drain_events();
    assert_eq!(
        events,
        vec![GameEvent::PlayerHit { lives_left: 0 }, GameEvent::GameOver]
    );
}

#[test]
fn test_goal_completes_level_once() {
    let mut state = GameState::new(SEED);
    stand_on_ground(&mut state, 730.0);

    tick(&mut state, &idle());
    assert_eq!(state.phase, GamePhase::LevelComplete);
    assert_eq!(state.player.score, 1000);

    let frozen = state.player.clone();
    for _ in 0..30 {
        tick(
            &mut state,
            &TickInput {
                horizontal: Horizontal::Left,
                jump: true,
                restart: false,
            },
        );
    }
    assert_eq!(state.player, frozen);
    assert_eq!(state.player.score, 1000);
}

#[test]
fn test_restart_restores_level() {
    let fresh = GameState::new(SEED);
    let mut state = GameState::new(SEED);
    for _ in 0..240 {
        tick(&mut state, &idle());
    }
    state.player.lives = 1;
    state.player.score = 500;
    let target = state.agents[3].rect.center().x;
    stand_on_ground(&mut state, target);
    tick(&mut state, &idle());
    assert_eq!(state.phase, GamePhase::GameOver);

    tick(
        &mut state,
        &TickInput {
            restart: true,
            ..Default::default()
        },
    );

    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.player.lives, 3);
    assert_eq!(state.player.score, 0);
    assert_eq!(state.player.rect().center(), Vec2::new(100.0, 400.0));
    assert_eq!(state.player.body.vel, Vec2::ZERO);
    assert_eq!(state.agents, fresh.agents);
    assert_eq!(state.goal, fresh.goal);
}

#[test]
fn test_autopilot_runs_are_reproducible() {
    let run = || {
        let mut state = GameState::new(SEED);
        for _ in 0..1500 {
            let controls = autopilot::pilot(&state);
            if !state.is_running() {
                break;
            }
            tick(&mut state, &controls.intent());
        }
        serde_json::to_string(&state).expect("state serializes")
    };
    assert_eq!(run(), run());
}

#[test]
fn test_custom_world_width_bounds_agents() {
    let tuning = Tuning {
        world_width: 500.0,
        ..Default::default()
    };
    let mut state = GameState::with_tuning(SEED, tuning);
    for _ in 0..600 {
        tick(&mut state, &idle());
        // Ground agents turn at the narrower world edge
        for agent in state.agents.iter().filter(|a| a.rect.bottom() == 500.0) {
            assert!(agent.rect.right() <= 500.0);
        }
    }
}
