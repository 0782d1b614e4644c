//! Patrolling enemy AI
//!
//! Agents walk back and forth along the platform they were placed on. No
//! gravity applies to them; only x ever changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::level::AgentSpawn;
use super::state::{Direction, Platform};
use crate::settings::Tuning;

/// An enemy that paces along a platform and turns at its edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolAgent {
    pub rect: Rect,
    pub direction: Direction,
    /// Pixels moved per tick (always positive)
    pub speed: f32,
}

impl PatrolAgent {
    pub fn new(rect: Rect, direction: Direction, speed: f32) -> Self {
        assert!(speed > 0.0, "patrol speed must be positive");
        Self {
            rect,
            direction,
            speed,
        }
    }

    pub fn from_spawn(spawn: &AgentSpawn) -> Self {
        Self::new(spawn.rect, spawn.direction, spawn.speed)
    }

    #[inline]
    fn step(&self) -> Vec2 {
        Vec2::new(self.direction.sign() * self.speed, 0.0)
    }

    /// Advance one tick. Returns true if the agent turned around.
    ///
    /// After stepping, a probe (the rect dropped by `agent_probe_drop` and
    /// pushed one more step ahead) must touch some platform, and the rect
    /// must still be inside the world. Otherwise the agent reverses and
    /// steps back, ending the tick where it started.
    pub fn advance(&mut self, platforms: &[Platform], tuning: &Tuning) -> bool {
        self.rect.translate(self.step());

        let probe = self
            .rect
            .translated(Vec2::new(0.0, tuning.agent_probe_drop) + self.step());
        let ground_ahead = platforms.iter().any(|p| probe.overlaps(&p.rect));
        let out_of_world = self.rect.left() < 0.0 || self.rect.right() > tuning.world_width;

        if !ground_ahead || out_of_world {
            self.direction = self.direction.reversed();
            self.rect.translate(self.step());
            return true;
        }
        false
    }
}
