//! Collision tests for the ball against the arena, paddle and bricks
//!
//! Everything is axis-aligned. The ball is treated as its radius-extended
//! bounding box for walls, and as its center point for the paddle and
//! bricks.

use glam::Vec2;

use super::state::{Ball, Paddle};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, PADDLE_WIDTH, PADDLE_Y};

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Point strictly inside the box (edges excluded)
    pub fn contains_point_strict(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}

/// Ball extent crosses the left or right arena edge
pub fn crosses_side_walls(ball: &Ball) -> bool {
    ball.left() < 0.0 || ball.right() > ARENA_WIDTH
}

/// Ball extent crosses the top arena edge
pub fn crosses_ceiling(ball: &Ball) -> bool {
    ball.top() < 0.0
}

/// Ball should bounce off the paddle.
///
/// The ball's lower edge must reach the paddle's top, and its *center* must
/// lie strictly within the paddle's horizontal span. A ball clipping the
/// paddle corner with its rim does not bounce.
pub fn paddle_deflects(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bottom() >= PADDLE_Y && ball.pos.x > paddle.x && ball.pos.x < paddle.x + PADDLE_WIDTH
}

/// Ball has fully left the arena through the floor
pub fn fell_out(ball: &Ball) -> bool {
    ball.top() > ARENA_HEIGHT
}
