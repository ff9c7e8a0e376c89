//! Fixed timestep simulation tick
//!
//! Advances the game by one tick. Movement is per tick, not per second;
//! only the countdown looks at the clock.

use std::time::Duration;

use super::collision::{crosses_ceiling, crosses_side_walls, fell_out, paddle_deflects};
use super::state::{GameEvent, GameOverReason, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move-left key is held
    pub move_left: bool,
    /// Move-right key is held
    pub move_right: bool,
}

/// Advance the game state by one tick.
///
/// `now` is the current reading of the host clock. The countdown drops by
/// at most one per call, however much time has passed since the last drop.
pub fn tick(state: &mut GameState, input: &TickInput, now: Duration) {
    // Events describe only the latest tick, even a no-op one
    state.events.clear();
    if state.is_game_over() {
        return;
    }

    state.time_ticks += 1;

    // Countdown
    if now.saturating_sub(state.last_countdown_at) >= COUNTDOWN_STEP {
        state.countdown -= 1;
        state.last_countdown_at = now;
        state.events.push(GameEvent::CountdownTick {
            remaining: state.countdown,
        });
        if state.countdown <= 0 {
            state.end(GameOverReason::TimeUp);
            return;
        }
    }

    // Paddle
    let mut dx = 0.0;
    if input.move_left {
        dx -= PADDLE_SPEED;
    }
    if input.move_right {
        dx += PADDLE_SPEED;
    }
    state.paddle.shift(dx);

    // Ball
    let ball = &mut state.ball;
    ball.pos += ball.vel;

    if crosses_side_walls(ball) {
        ball.vel.x = -ball.vel.x;
        state.events.push(GameEvent::WallBounce);
    }
    if crosses_ceiling(ball) {
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::CeilingBounce);
    }

    if paddle_deflects(ball, &state.paddle) {
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::PaddleBounce);
    }

    if fell_out(ball) {
        state.end(GameOverReason::BallLost);
    }

    // Bricks: first hit in grid order wins, one per tick
    let center = state.ball.pos;
    if let Some(index) = state
        .bricks
        .iter()
        .position(|b| b.active && b.bounds().contains_point_strict(center))
    {
        state.bricks[index].active = false;
        state.ball.vel.y = -state.ball.vel.y;
        state.score += BRICK_SCORE;
        state.events.push(GameEvent::BrickDestroyed { index });
    }
}
