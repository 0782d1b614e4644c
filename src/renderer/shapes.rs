//! Shape generation for 2D primitives and the game scene
//!
//! Everything is emitted in world coordinates (y down); the pipeline maps
//! to NDC. Sprites are built from flat primitives every frame.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::input::{ControlState, ControlZones, TouchButton};
use crate::sim::{Direction, GameState, Rect};

/// Two triangles covering `r`
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, b, color),
    ]
}

/// Border of `r` drawn inward with the given thickness
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.width / 2.0).min(r.height / 2.0);
    let inner_h = r.height - 2.0 * t;
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(&Rect::new(r.x, r.y, r.width, t), color));
    vertices.extend(rect(&Rect::new(r.x, r.bottom() - t, r.width, t), color));
    if inner_h > 0.0 {
        vertices.extend(rect(&Rect::new(r.x, r.y + t, t, inner_h), color));
        vertices.extend(rect(&Rect::new(r.right() - t, r.y + t, t, inner_h), color));
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Sprite-local placement helper. Local coords are relative to the sprite's
/// top-left; `mirror` flips them horizontally.
struct Sprite<'a> {
    frame: &'a Rect,
    mirror: bool,
}

impl Sprite<'_> {
    fn point(&self, x: f32, y: f32) -> Vec2 {
        let x = if self.mirror { self.frame.width - x } else { x };
        Vec2::new(self.frame.x + x, self.frame.y + y)
    }

    fn rect(&self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        let x = if self.mirror { self.frame.width - x - w } else { x };
        Rect::new(self.frame.x + x, self.frame.y + y, w, h)
    }
}

const CIRCLE_SEGMENTS: u32 = 16;

fn player(state: &GameState) -> Vec<Vertex> {
    let frame = state.player.rect();
    let s = Sprite {
        frame,
        mirror: state.player.facing == Direction::Left,
    };
    let outfit = colors::OUTFITS[state.layout.outfit as usize % colors::OUTFITS.len()];

    let mut v = Vec::new();
    v.extend(rect(&s.rect(0.0, 0.0, 40.0, 40.0), outfit));
    v.extend(rect(&s.rect(0.0, 40.0, 40.0, 20.0), colors::JEANS));
    // Worn patches on the jeans
    for (x, y) in [(5.0, 45.0), (30.0, 50.0), (20.0, 55.0)] {
        v.extend(circle(s.point(x, y), 3.0, colors::SKY, 8));
    }
    v.extend(circle(s.point(20.0, 15.0), 10.0, colors::SKIN, CIRCLE_SEGMENTS));
    v.extend(circle(s.point(20.0, 35.0), 4.0, colors::PENDANT, 8));
    // Eyes sit slightly toward the facing side
    v.extend(circle(s.point(24.0, 13.0), 2.0, colors::EYE, 6));
    v.extend(circle(s.point(28.0, 13.0), 2.0, colors::EYE, 6));
    v.extend(rect(&s.rect(5.0, 5.0, 30.0, 6.0), colors::HAIR));
    v
}

fn agent(frame: &Rect) -> Vec<Vertex> {
    let s = Sprite {
        frame,
        mirror: false,
    };
    let mut v = rect(frame, colors::AGENT_SUIT);
    v.extend(rect(&s.rect(16.0, 25.0, 3.0, 15.0), colors::AGENT_TIE));
    v.extend(circle(s.point(18.0, 20.0), 6.0, colors::AGENT_BADGE, 10));
    v.extend(circle(s.point(18.0, 10.0), 8.0, colors::SKIN, CIRCLE_SEGMENTS));
    v.extend(rect(&s.rect(11.0, 8.0, 6.0, 3.0), colors::EYE));
    v.extend(rect(&s.rect(19.0, 8.0, 6.0, 3.0), colors::EYE));
    v
}

fn goal(frame: &Rect) -> Vec<Vertex> {
    let s = Sprite {
        frame,
        mirror: false,
    };
    let mut v = rect(frame, colors::GOAL_WALL);
    v.extend(rect(&s.rect(20.0, 40.0, 20.0, 40.0), colors::GOAL_DOOR));
    v.extend(rect(&s.rect(10.0, 20.0, 15.0, 15.0), colors::GOAL_WINDOW));
    v.extend(rect(&s.rect(35.0, 20.0, 15.0, 15.0), colors::GOAL_WINDOW));
    v.extend(rect(&s.rect(15.0, 0.0, 30.0, 15.0), colors::GOAL_SIGN));
    v
}

fn clouds(world_width: f32, time_secs: f64) -> Vec<Vertex> {
    let wrap = world_width as f64 + 200.0;
    let mut v = Vec::new();
    for i in 0..3 {
        let x = ((time_secs * 33.0 + i as f64 * 300.0) % wrap) as f32 - 100.0;
        let y = 50.0 + i as f32 * 40.0;
        // Ellipse approximated by three overlapping puffs
        for (dx, r) in [(25.0, 18.0), (50.0, 20.0), (75.0, 18.0)] {
            v.extend(circle(Vec2::new(x + dx, y + 20.0), r, colors::CLOUD, 12));
        }
    }
    v
}

fn touch_controls(zones: &ControlZones, controls: &ControlState) -> Vec<Vertex> {
    let mut v = Vec::new();
    for (button, zone) in zones.iter() {
        let fill = if controls.is_touched(button) {
            colors::TOUCH_BUTTON_PRESSED
        } else {
            colors::TOUCH_BUTTON
        };
        v.extend(rect(zone, fill));
        v.extend(rect_outline(zone, 3.0, colors::TOUCH_BUTTON_EDGE));

        let c = zone.center();
        let (a, b, tip) = match button {
            TouchButton::Left => (
                Vec2::new(c.x + 10.0, c.y - 12.0),
                Vec2::new(c.x + 10.0, c.y + 12.0),
                Vec2::new(c.x - 12.0, c.y),
            ),
            TouchButton::Right => (
                Vec2::new(c.x - 10.0, c.y - 12.0),
                Vec2::new(c.x - 10.0, c.y + 12.0),
                Vec2::new(c.x + 12.0, c.y),
            ),
            TouchButton::Jump => (
                Vec2::new(c.x - 12.0, c.y + 10.0),
                Vec2::new(c.x + 12.0, c.y + 10.0),
                Vec2::new(c.x, c.y - 12.0),
            ),
        };
        v.extend(triangle(a, b, tip, colors::TOUCH_ARROW));
    }
    v
}

/// Full frame in draw order: clouds, platforms, agents, goal, player, touch
/// controls. Reads the state only.
pub fn scene(
    state: &GameState,
    controls: &ControlState,
    zones: &ControlZones,
    time_secs: f64,
) -> Vec<Vertex> {
    let mut v = clouds(state.tuning.world_width, time_secs);

    for platform in &state.platforms {
        v.extend(rect(&platform.rect, colors::PLATFORM));
        v.extend(rect_outline(&platform.rect, 2.0, colors::PLATFORM_EDGE));
    }
    for a in &state.agents {
        v.extend(agent(&a.rect));
    }
    v.extend(goal(&state.goal.rect));
    v.extend(player(state));
    v.extend(touch_controls(zones, controls));
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let v = rect(&r, [1.0; 4]);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_outline_of_thin_rect() {
        // 20px tall platform with 2px border: four strips
        let v = rect_outline(&Rect::new(0.0, 0.0, 100.0, 20.0), 2.0, [1.0; 4]);
        assert_eq!(v.len(), 24);
    }

    #[test]
    fn test_mirrored_sprite_rect() {
        let frame = Rect::new(100.0, 0.0, 40.0, 60.0);
        let s = Sprite {
            frame: &frame,
            mirror: true,
        };
        assert_eq!(s.rect(5.0, 5.0, 30.0, 6.0).left(), 105.0);
        assert_eq!(s.rect(0.0, 0.0, 10.0, 10.0).right(), 140.0);
        assert_eq!(s.point(24.0, 13.0), Vec2::new(116.0, 13.0));
    }

    #[test]
    fn test_scene_is_triangle_list() {
        let state = GameState::new(5);
        let zones = ControlZones::for_world(800.0, 600.0);
        let v = scene(&state, &ControlState::default(), &zones, 1.5);
        assert!(!v.is_empty());
        assert_eq!(v.len() % 3, 0);
    }

    #[test]
    fn test_pressed_button_highlighted() {
        let state = GameState::new(5);
        let zones = ControlZones::for_world(800.0, 600.0);
        let mut controls = ControlState::default();
        controls.press_point(zones.jump.center(), &zones);
        let v = scene(&state, &controls, &zones, 0.0);
        assert!(v.iter().any(|v| v.color == colors::TOUCH_BUTTON_PRESSED));

        let idle = scene(&state, &ControlState::default(), &zones, 0.0);
        assert!(!idle.iter().any(|v| v.color == colors::TOUCH_BUTTON_PRESSED));
    }
}
