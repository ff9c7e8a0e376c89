//! The game loop object
//!
//! `Game` owns the session state, the held-direction flags and a clock.
//! The host calls `step` on a fixed cadence and `render` whenever it wants
//! a picture; both run on the host's thread.

use crate::platform::time::{Clock, SystemClock};
use crate::renderer::{self, Frame};
use crate::sim::{GameState, TickInput, tick};

/// A running brick breaker session
#[derive(Debug)]
pub struct Game<C: Clock = SystemClock> {
    state: GameState,
    input: TickInput,
    clock: C,
}

impl Game<SystemClock> {
    /// New game on the wall clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for Game<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Game<C> {
    pub fn with_clock(clock: C) -> Self {
        let state = GameState::new(clock.now());
        Self {
            state,
            input: TickInput::default(),
            clock,
        }
    }

    /// Advance by one tick
    pub fn step(&mut self) {
        let now = self.clock.now();
        tick(&mut self.state, &self.input, now);
    }

    /// Draw primitives for the current state. Never modifies the state.
    pub fn render(&self) -> Frame {
        renderer::render(&self.state)
    }

    pub fn set_move_left(&mut self, held: bool) {
        self.input.move_left = held;
    }

    pub fn set_move_right(&mut self, held: bool) {
        self.input.move_right = held;
    }

    /// Throw the session away and start over
    pub fn restart(&mut self) {
        self.state = GameState::new(self.clock.now());
        self.input = TickInput::default();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[cfg(test)]
    pub(crate) fn input(&self) -> TickInput {
        self.input
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }
}
