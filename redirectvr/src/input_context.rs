use cgmath::{vec2, vec3, Deg, InnerSpace, Quaternion, Rotation3, Vector2, Vector3};

use crate::config::TeleportButton;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Default for Pose {
    fn default() -> Self {
        Pose {
            position: vec3(0.0, 0.0, 0.0),
            rotation: Quaternion::from_angle_y(Deg(0.0)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hand {
    pub pose: Pose,
    pub thumbstick: Vector2<f32>,
    pub trigger_value: f32,
    pub squeeze_value: f32,
    pub a_value: f32,
}

impl Default for Hand {
    fn default() -> Self {
        Hand {
            pose: Pose::default(),
            thumbstick: vec2(0.0, 0.0),
            trigger_value: 0.0,
            squeeze_value: 0.0,
            a_value: 0.0,
        }
    }
}

impl Hand {
    pub fn button_value(&self, button: TeleportButton) -> f32 {
        match button {
            TeleportButton::Trigger => self.trigger_value,
            TeleportButton::AButton => self.a_value,
            TeleportButton::Squeeze => self.squeeze_value,
        }
    }
}

/// One frame of sampled input. `head` is the input space that movement
/// directions are expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputContext {
    pub head: Pose,
    pub left_hand: Hand,
    pub right_hand: Hand,
}

impl InputContext {
    /// Movement axis from the right thumbstick, clamped to unit length.
    pub fn move_axis(&self) -> Vector2<f32> {
        clamp_magnitude(self.right_hand.thumbstick, 1.0)
    }

    /// Horizontal axis driving snap turns.
    pub fn turn_axis(&self) -> f32 {
        self.left_hand.thumbstick.x
    }
}

pub fn clamp_magnitude(vec: Vector2<f32>, max: f32) -> Vector2<f32> {
    let magnitude = vec.magnitude();
    if !magnitude.is_finite() {
        return vec2(0.0, 0.0);
    }
    if magnitude > max {
        vec * (max / magnitude)
    } else {
        vec
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEdge {
    Idle,
    Pressed,
    Held,
    Released,
}

/// Turns a level-triggered button into press/hold/release edges.
#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonTracker {
    was_pressed: bool,
}

impl ButtonTracker {
    pub fn update(&mut self, is_pressed: bool) -> ButtonEdge {
        let edge = match (self.was_pressed, is_pressed) {
            (false, true) => ButtonEdge::Pressed,
            (true, true) => ButtonEdge::Held,
            (true, false) => ButtonEdge::Released,
            (false, false) => ButtonEdge::Idle,
        };
        self.was_pressed = is_pressed;
        edge
    }

    pub fn reset(&mut self) {
        self.was_pressed = false;
    }
}
