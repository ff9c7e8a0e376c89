//! Game state and core simulation types
//!
//! Everything a session needs lives in `GameState`. A restart throws the
//! whole value away and builds a new one.

use std::time::Duration;

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// The countdown reached zero
    TimeUp,
    /// The ball fell past the bottom edge
    BallLost,
}

/// Something that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball reflected off the left or right wall
    WallBounce,
    /// Ball reflected off the top edge
    CeilingBounce,
    /// Ball reflected off the paddle
    PaddleBounce,
    /// Brick at this index in `GameState::bricks` was knocked out
    BrickDestroyed { index: usize },
    /// One second elapsed; `remaining` is the new countdown value
    CountdownTick { remaining: i32 },
    GameOver { reason: GameOverReason },
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at the arena center moving diagonally up-right
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            vel: Vec2::new(BALL_START_VEL.0, BALL_START_VEL.1),
            radius: BALL_RADIUS,
        }
    }

    /// Topmost y of the ball
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    /// Bottommost y of the ball
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// The player's paddle. Only `x` moves; `y` is fixed near the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (ARENA_WIDTH - PADDLE_WIDTH) / 2.0,
        }
    }
}

impl Paddle {
    /// Largest x the paddle may take
    pub const MAX_X: f32 = ARENA_WIDTH - PADDLE_WIDTH;

    /// Top-left corner of the paddle
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, PADDLE_Y)
    }

    /// Move by `dx` and clamp into the arena
    pub fn shift(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, Self::MAX_X);
    }
}

/// A destructible brick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub active: bool,
}

impl Brick {
    /// Brick at grid cell (`col`, `row`)
    pub fn at_cell(col: usize, row: usize) -> Self {
        Self {
            pos: Vec2::new(
                col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
                row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
            ),
            active: true,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin_size(self.pos, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT))
    }
}

/// Build the full brick grid.
///
/// Order is column-major (outer loop over columns). Collision scanning
/// relies on this order to break ties when the ball overlaps two bricks.
pub fn brick_grid() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLS);
    for col in 0..BRICK_COLS {
        for row in 0..BRICK_ROWS {
            bricks.push(Brick::at_cell(col, row));
        }
    }
    bricks
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub ball: Ball,
    pub paddle: Paddle,
    /// Fixed-length grid in column-major order
    pub bricks: Vec<Brick>,
    pub score: u32,
    /// Seconds left on the clock
    pub countdown: i32,
    pub phase: GamePhase,
    /// Set together with `GamePhase::GameOver`
    pub end_reason: Option<GameOverReason>,
    /// Clock reading at the last countdown decrement (or session start)
    pub last_countdown_at: Duration,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session. `now` is the current clock reading.
    pub fn new(now: Duration) -> Self {
        Self {
            ball: Ball::new(),
            paddle: Paddle::default(),
            bricks: brick_grid(),
            score: 0,
            countdown: COUNTDOWN_START,
            phase: GamePhase::Playing,
            end_reason: None,
            last_countdown_at: now,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Number of bricks still standing
    pub fn active_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.active).count()
    }

    /// Number of bricks knocked out so far
    pub fn cleared_bricks(&self) -> usize {
        self.bricks.len() - self.active_bricks()
    }

    /// End the run. Has no effect once the run is already over.
    pub fn end(&mut self, reason: GameOverReason) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.end_reason = Some(reason);
        self.events.push(GameEvent::GameOver { reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(Duration::ZERO);
        assert_eq!(state.ball.pos, Vec2::new(240.0, 160.0));
        assert_eq!(state.ball.vel, Vec2::new(2.0, -2.0));
        assert_eq!(state.paddle.x, 202.5);
        assert_eq!(state.score, 0);
        assert_eq!(state.countdown, 60);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bricks.len(), BRICK_ROWS * BRICK_COLS);
        assert!(state.bricks.iter().all(|b| b.active));
        assert_eq!(state.end_reason, None);
    }

    #[test]
    fn test_end_is_sticky() {
        let mut state = GameState::new(Duration::ZERO);
        state.end(GameOverReason::BallLost);
        state.end(GameOverReason::TimeUp);
        assert!(state.is_game_over());
        assert_eq!(state.end_reason, Some(GameOverReason::BallLost));
        assert_eq!(state.events, vec![GameEvent::GameOver { reason: GameOverReason::BallLost }]);
    }

    #[test]
    fn test_brick_grid_is_column_major() {
        let bricks = brick_grid();
        // First column top to bottom
        assert_eq!(bricks[0].pos, Vec2::new(35.0, 30.0));
        assert_eq!(bricks[1].pos, Vec2::new(35.0, 60.0));
        assert_eq!(bricks[3].pos, Vec2::new(35.0, 120.0));
        // Second column starts after BRICK_ROWS entries
        assert_eq!(bricks[4].pos, Vec2::new(120.0, 30.0));
        // Last brick is bottom-right
        assert_eq!(bricks[19].pos, Vec2::new(375.0, 120.0));
    }

    #[test]
    fn test_grid_fits_in_arena() {
        for brick in brick_grid() {
            let b = brick.bounds();
            assert!(b.min.x >= 0.0 && b.max.x <= ARENA_WIDTH);
            assert!(b.min.y >= 0.0 && b.max.y < PADDLE_Y);
        }
    }

    #[test]
    fn test_paddle_shift_clamps() {
        let mut paddle = Paddle { x: 3.0 };
        paddle.shift(-PADDLE_SPEED);
        assert_eq!(paddle.x, 0.0);

        paddle.x = Paddle::MAX_X - 1.0;
        paddle.shift(PADDLE_SPEED);
        assert_eq!(paddle.x, Paddle::MAX_X);
    }

    #[test]
    fn test_paddle_sits_above_floor() {
        assert_eq!(Paddle::default().origin().y, 305.0);
    }
}
