//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed per-tick movement
//! - Time only through the `now` argument of `tick`
//! - Stable iteration order (brick grid order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{Ball, Brick, GameEvent, GameOverReason, GamePhase, GameState, Paddle, brick_grid};
pub use tick::{TickInput, tick};
