//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only, consumed at level build
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod geom;
pub mod kinematics;
pub mod level;
pub mod patrol;
pub mod state;
pub mod tick;

pub use geom::Rect;
pub use kinematics::Body;
pub use level::{AgentSpawn, LevelLayout};
pub use patrol::PatrolAgent;
pub use state::{Direction, GameEvent, GamePhase, GameState, GoalZone, Platform, Player};
pub use tick::{Horizontal, TickInput, tick};
