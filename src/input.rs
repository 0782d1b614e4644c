//! Raw control signals and their reduction to per-tick intent
//!
//! The shell fills a [`ControlState`] from whatever devices it has (keys,
//! touch points); [`ControlState::intent`] is the only thing the simulation
//! ever sees.

use glam::Vec2;

use crate::consts::TOUCH_BUTTON_SIZE;
use crate::sim::{Horizontal, Rect, TickInput};

/// On-screen touch buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Left,
    Right,
    Jump,
}

/// Screen rectangles for the touch buttons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlZones {
    pub left: Rect,
    pub right: Rect,
    pub jump: Rect,
}

impl ControlZones {
    /// Standard layout: left/right pair bottom-left, jump bottom-right
    pub fn for_world(width: f32, height: f32) -> Self {
        let y = height - 100.0;
        Self {
            left: Rect::new(50.0, y, TOUCH_BUTTON_SIZE, TOUCH_BUTTON_SIZE),
            right: Rect::new(130.0, y, TOUCH_BUTTON_SIZE, TOUCH_BUTTON_SIZE),
            jump: Rect::new(width - 110.0, y, TOUCH_BUTTON_SIZE, TOUCH_BUTTON_SIZE),
        }
    }

    /// Which button (if any) a press at `point` lands on. Checked left,
    /// right, jump; first match wins.
    pub fn hit(&self, point: Vec2) -> Option<TouchButton> {
        if self.left.contains_point(point) {
            Some(TouchButton::Left)
        } else if self.right.contains_point(point) {
            Some(TouchButton::Right)
        } else if self.jump.contains_point(point) {
            Some(TouchButton::Jump)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TouchButton, &Rect)> {
        [
            (TouchButton::Left, &self.left),
            (TouchButton::Right, &self.right),
            (TouchButton::Jump, &self.jump),
        ]
        .into_iter()
    }
}

/// Per-frame control signals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_held: bool,
    /// One-shot: jump went down this frame
    pub jump_pressed: bool,
    /// One-shot: restart requested this frame
    pub restart_pressed: bool,
    /// Leave the loop at the next iteration
    pub quit_requested: bool,
    /// Touch buttons currently pressed (for renderer highlight)
    pub touched: Vec<TouchButton>,
}

impl ControlState {
    /// Fold a pointer press into the signals. Presses outside every zone
    /// are ignored.
    pub fn press_point(&mut self, point: Vec2, zones: &ControlZones) -> Option<TouchButton> {
        let button = zones.hit(point)?;
        match button {
            TouchButton::Left => self.move_left = true,
            TouchButton::Right => self.move_right = true,
            TouchButton::Jump => self.jump_held = true,
        }
        if !self.touched.contains(&button) {
            self.touched.push(button);
        }
        Some(button)
    }

    /// Collapse the signals into tick intent. Left wins when both
    /// directions are asserted.
    pub fn intent(&self) -> TickInput {
        let horizontal = if self.move_left {
            Horizontal::Left
        } else if self.move_right {
            Horizontal::Right
        } else {
            Horizontal::Idle
        };
        TickInput {
            horizontal,
            jump: self.jump_held || self.jump_pressed,
            restart: self.restart_pressed,
        }
    }

    /// Clear one-shot signals after a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.jump_pressed = false;
        self.restart_pressed = false;
    }

    pub fn is_touched(&self, button: TouchButton) -> bool {
        self.touched.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones() -> ControlZones {
        ControlZones::for_world(800.0, 600.0)
    }

    #[test]
    fn test_zone_layout() {
        let z = zones();
        assert_eq!(z.left, Rect::new(50.0, 500.0, 60.0, 60.0));
        assert_eq!(z.right, Rect::new(130.0, 500.0, 60.0, 60.0));
        assert_eq!(z.jump, Rect::new(690.0, 500.0, 60.0, 60.0));
    }

    #[test]
    fn test_hit_testing() {
        let z = zones();
        assert_eq!(z.hit(Vec2::new(60.0, 510.0)), Some(TouchButton::Left));
        assert_eq!(z.hit(Vec2::new(150.0, 550.0)), Some(TouchButton::Right));
        assert_eq!(z.hit(Vec2::new(700.0, 520.0)), Some(TouchButton::Jump));
        assert_eq!(z.hit(Vec2::new(400.0, 300.0)), None);
        // Gap between left and right buttons
        assert_eq!(z.hit(Vec2::new(120.0, 520.0)), None);
    }

    #[test]
    fn test_left_beats_right() {
        let controls = ControlState {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        assert_eq!(controls.intent().horizontal, Horizontal::Left);
    }

    #[test]
    fn test_idle_when_nothing_held() {
        let intent = ControlState::default().intent();
        assert_eq!(intent, TickInput::default());
    }

    #[test]
    fn test_jump_held_or_pressed() {
        let held = ControlState {
            jump_held: true,
            ..Default::default()
        };
        assert!(held.intent().jump);
        let pressed = ControlState {
            jump_pressed: true,
            ..Default::default()
        };
        assert!(pressed.intent().jump);
    }

    #[test]
    fn test_touch_feeds_signals() {
        let z = zones();
        let mut controls = ControlState::default();
        controls.press_point(Vec2::new(150.0, 530.0), &z);
        controls.press_point(Vec2::new(720.0, 530.0), &z);
        controls.press_point(Vec2::new(720.0, 540.0), &z);
        let intent = controls.intent();
        assert_eq!(intent.horizontal, Horizontal::Right);
        assert!(intent.jump);
        assert!(controls.is_touched(TouchButton::Jump));
        assert_eq!(controls.touched.len(), 2);
    }

    #[test]
    fn test_one_shots_cleared() {
        let mut controls = ControlState {
            jump_pressed: true,
            restart_pressed: true,
            move_right: true,
            ..Default::default()
        };
        assert!(controls.intent().restart);
        controls.clear_one_shots();
        let intent = controls.intent();
        assert!(!intent.restart);
        assert!(!intent.jump);
        assert_eq!(intent.horizontal, Horizontal::Right);
    }
}
