//! Brick Breaker - a single-screen breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddle, bricks, countdown)
//! - `game`: The game loop object the host drives (`step` / `render` / input)
//! - `renderer`: Draw-primitive frames and the terminal render sink
//! - `platform`: Host time sources and keyboard handling
//! - `settings`: Host settings loaded from JSON

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
///
/// All positions live in a fixed 480x320 logical space, origin top-left,
/// y growing downward.
pub mod consts {
    use std::time::Duration;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 480.0;
    pub const ARENA_HEIGHT: f32 = 320.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_VEL: (f32, f32) = (2.0, -2.0);

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Units moved per tick while a direction is held
    pub const PADDLE_SPEED: f32 = 6.0;
    /// Gap between the paddle's bottom edge and the arena floor
    pub const PADDLE_BOTTOM_GAP: f32 = 5.0;
    /// Y coordinate of the paddle's top edge (fixed)
    pub const PADDLE_Y: f32 = ARENA_HEIGHT - PADDLE_HEIGHT - PADDLE_BOTTOM_GAP;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 4;
    pub const BRICK_COLS: usize = 5;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 35.0;
    pub const BRICK_SCORE: u32 = 10;

    /// Countdown start value, in seconds
    pub const COUNTDOWN_START: i32 = 60;
    /// Real time between countdown decrements
    pub const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

    /// Fixed simulation cadence (~60 Hz)
    pub const TICK_INTERVAL: Duration = Duration::from_millis(16);
    /// Maximum ticks run per host frame to avoid a spiral of death
    pub const MAX_CATCH_UP_TICKS: u32 = 8;
}

