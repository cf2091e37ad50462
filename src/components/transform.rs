//! Position, facing and motion of an entity.
//!
//! Written by the movement system every tick and read by the animation and
//! render systems.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Facing of a character. Also selects which directional clip is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step for this direction in screen space (y grows downwards).
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Kinematic state.
///
/// `velocity` holds a unit step per axis (each component is -1, 0 or 1);
/// `speed` scales it when the position is integrated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub direction: Direction,
    pub speed: f32,
    pub velocity: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            direction: Direction::default(),
            speed: Self::BASE_SPEED,
            velocity: Vec2::ZERO,
        }
    }
}

impl Transform {
    /// Speed every tick starts from before key actions are applied.
    pub const BASE_SPEED: f32 = 1.0;

    pub fn new(position: Vec2, direction: Direction) -> Self {
        Self {
            position,
            direction,
            ..Self::default()
        }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y), Direction::default())
    }

    /// Clear per-tick motion: zero velocity, baseline speed.
    pub fn reset_motion(&mut self) {
        self.velocity = Vec2::ZERO;
        self.speed = Self::BASE_SPEED;
    }

    /// `position += speed * velocity`, componentwise.
    pub fn integrate(&mut self) {
        self.position += self.velocity * self.speed;
    }

    pub fn is_stationary(&self) -> bool {
        self.velocity == Vec2::ZERO
    }
}
