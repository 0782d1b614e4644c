//! Gravity-affected body physics
//!
//! One tick = one frame. Explicit Euler with no sub-stepping, then
//! post-integration corrections against the world bounds and platforms.
//!
//! Platforms only resolve vertically. A body pushed sideways into a
//! platform's flank is left intersecting it until it moves up or down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::Platform;
use crate::settings::Tuning;

/// Collision volume plus velocity and grounded flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
    pub vel: Vec2,
    /// Resting on a platform top as of the last [`Body::advance`]
    pub on_ground: bool,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    /// Advance one tick: gravity, integration, bounds, platform landing
    pub fn advance(&mut self, platforms: &[Platform], tuning: &Tuning) {
        // Gravity applies every tick, mid-jump included
        self.vel.y += tuning.gravity;

        self.rect.translate(self.vel);

        // Keep inside the world horizontally
        if self.rect.left() < 0.0 {
            self.rect.set_left(0.0);
        }
        if self.rect.right() > tuning.world_width {
            self.rect.set_right(tuning.world_width);
        }
        // Ceiling; there is no floor bound
        if self.rect.top() < 0.0 {
            self.rect.set_top(0.0);
            self.vel.y = 0.0;
        }

        self.on_ground = false;
        for platform in platforms {
            if !self.rect.overlaps(&platform.rect) {
                continue;
            }
            if self.vel.y > 0.0 {
                // Falling: land on top
                self.rect.set_bottom(platform.rect.top());
                self.vel.y = 0.0;
                self.on_ground = true;
            } else if self.vel.y < 0.0 {
                // Rising: bump head on underside
                self.rect.set_top(platform.rect.bottom());
                self.vel.y = 0.0;
            }
        }
    }

    /// Launch upward with `strength` (negative) if grounded. Returns whether
    /// the jump happened; airborne calls change nothing.
    pub fn jump(&mut self, strength: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel.y = strength;
        true
    }
}
