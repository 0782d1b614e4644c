//! Axis-aligned rectangle geometry
//!
//! Screen coordinates: origin at the top-left, +x right, +y down. Every
//! collision volume in the game (platforms, player, agents, goal, touch
//! zones) is one of these.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored as top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rect from its top-left corner. Size must be positive.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "rect size must be positive, got {width}x{height}"
        );
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rect of the given size centred on `center`
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    /// Move the rect by `delta`
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Copy of this rect moved by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        let mut r = *self;
        r.translate(delta);
        r
    }

    /// Strict overlap test. Rects that only share an edge do not overlap,
    /// so a body resting exactly on a platform top is not colliding with it.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open point test: left/top edges inside, right/bottom edges outside
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}
