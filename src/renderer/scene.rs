//! Scene assembly: turn a `GameState` into a `Frame`

use glam::Vec2;

use super::frame::{Frame, colors};
use crate::consts::*;
use crate::sim::GameState;

/// Where the HUD lines start
const HUD_TIME_POS: Vec2 = Vec2::new(10.0, 20.0);
const HUD_SCORE_POS: Vec2 = Vec2::new(10.0, 40.0);
/// Game-over text sits slightly left of center
const GAME_OVER_POS: Vec2 = Vec2::new(ARENA_WIDTH / 2.0 - 50.0, ARENA_HEIGHT / 2.0);
const GAME_OVER_LINE_GAP: f32 = 20.0;

/// Build the frame for the current state. Pure read.
pub fn render(state: &GameState) -> Frame {
    let mut frame = Frame::new(colors::BACKGROUND);

    if state.is_game_over() {
        frame.text(GAME_OVER_POS, "GAME OVER", colors::GAME_OVER_TEXT);
        frame.text(
            GAME_OVER_POS + Vec2::new(0.0, GAME_OVER_LINE_GAP),
            format!("Score: {}", state.score),
            colors::GAME_OVER_TEXT,
        );
        return frame;
    }

    frame.circle(state.ball.pos, state.ball.radius, colors::BALL);
    frame.rect(
        state.paddle.origin(),
        Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        colors::PADDLE,
    );
    for brick in state.bricks.iter().filter(|b| b.active) {
        frame.rect(brick.pos, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT), colors::BRICK);
    }

    frame.text(HUD_TIME_POS, format!("Time: {}", state.countdown), colors::HUD_TEXT);
    frame.text(HUD_SCORE_POS, format!("Score: {}", state.score), colors::HUD_TEXT);

    frame
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::renderer::DrawCommand;
    use crate::sim::GameOverReason;

    #[test]
    fn test_playing_frame_contents() {
        let mut state = GameState::new(Duration::ZERO);
        state.bricks[0].active = false;
        state.score = 10;
        state.countdown = 42;

        let frame = render(&state);

        // ball + paddle + 19 bricks + 2 texts
        assert_eq!(frame.commands.len(), 1 + 1 + 19 + 2);
        assert_eq!(
            frame.commands[0],
            DrawCommand::Circle {
                center: state.ball.pos,
                radius: BALL_RADIUS,
                color: colors::BALL,
            }
        );
        assert_eq!(
            frame.commands[1],
            DrawCommand::Rect {
                origin: Vec2::new(202.5, 305.0),
                size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
                color: colors::PADDLE,
            }
        );
        let texts: Vec<&str> = frame.texts().collect();
        assert_eq!(texts, vec!["Time: 42", "Score: 10"]);
    }

    #[test]
    fn test_inactive_bricks_not_drawn() {
        let mut state = GameState::new(Duration::ZERO);
        for brick in &mut state.bricks {
            brick.active = false;
        }
        let frame = render(&state);
        let rects = frame
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count();
        assert_eq!(rects, 1); // paddle only
    }

    #[test]
    fn test_game_over_frame_replaces_scene() {
        let mut state = GameState::new(Duration::ZERO);
        state.score = 70;
        state.end(GameOverReason::TimeUp);

        let frame = render(&state);

        assert_eq!(frame.commands.len(), 2);
        let texts: Vec<&str> = frame.texts().collect();
        assert_eq!(texts, vec!["GAME OVER", "Score: 70"]);
        assert_eq!(
            frame.commands[0],
            DrawCommand::Text {
                pos: Vec2::new(190.0, 160.0),
                text: "GAME OVER".into(),
                color: colors::GAME_OVER_TEXT,
            }
        );
    }

    #[test]
    fn test_render_does_not_touch_state() {
        let state = GameState::new(Duration::ZERO);
        let before = state.clone();
        let _ = render(&state);
        assert_eq!(state.ball, before.ball);
        assert_eq!(state.bricks, before.bricks);
        assert_eq!(state.time_ticks, before.time_ticks);
    }
}
