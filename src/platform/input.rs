//! Keyboard handling for the terminal host
//!
//! Terminals differ in what they report. Terminals with keyboard
//! enhancement send `Press`/`Repeat`/`Release`; classic ones only send
//! `Press` and rely on OS key repeat. `KeyTracker` treats a key as held
//! while it keeps showing up within a window of host frames, and drops it
//! at once on an explicit release. The first window after a press is long
//! enough to cover the OS delay before auto-repeat kicks in; once repeats
//! arrive the window shrinks so the paddle stops soon after the key does.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Hold window after a fresh press, in host frames. Covers an auto-repeat
/// delay of about 500 ms at the 16 ms loop cadence.
pub const DEFAULT_INITIAL_HOLD_WINDOW: u64 = 32;

/// Hold window once a key is repeating, in host frames. Covers repeat
/// rates down to about 16 Hz at the 16 ms loop cadence.
pub const DEFAULT_HOLD_WINDOW: u64 = 4;

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Restart,
    Quit,
}

/// Map a key to its action. Letters are case-insensitive.
pub fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Char('c') | KeyCode::Char('C') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::Quit)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
struct Hold {
    /// Frame of the last press or repeat
    frame: u64,
    repeating: bool,
}

/// Tracks which movement actions are currently held
#[derive(Debug, Clone)]
pub struct KeyTracker {
    frame: u64,
    initial_window: u64,
    repeat_window: u64,
    holds: HashMap<Action, Hold>,
}

impl KeyTracker {
    pub fn new(initial_window: u64, repeat_window: u64) -> Self {
        Self {
            frame: 0,
            initial_window,
            repeat_window,
            holds: HashMap::new(),
        }
    }

    /// Start a new host frame
    pub fn next_frame(&mut self) {
        self.frame += 1;
    }

    /// Feed a key event. Returns the action for a fresh press so the host
    /// can handle one-shot actions (restart, quit).
    pub fn handle(&mut self, event: &KeyEvent) -> Option<Action> {
        let action = action_for(event.code, event.modifiers)?;
        match event.kind {
            KeyEventKind::Press => {
                // Classic terminals report auto-repeat as more presses
                let repeating = self.is_held(action);
                self.holds.insert(
                    action,
                    Hold {
                        frame: self.frame,
                        repeating,
                    },
                );
                Some(action)
            }
            KeyEventKind::Repeat => {
                self.holds.insert(
                    action,
                    Hold {
                        frame: self.frame,
                        repeating: true,
                    },
                );
                None
            }
            KeyEventKind::Release => {
                self.holds.remove(&action);
                None
            }
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.holds
            .get(&action)
            .map(|hold| {
                let window = if hold.repeating {
                    self.repeat_window
                } else {
                    self.initial_window
                };
                self.frame.saturating_sub(hold.frame) <= window
            })
            .unwrap_or(false)
    }

    /// Forget every held key
    pub fn clear(&mut self) {
        self.holds.clear();
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_HOLD_WINDOW, DEFAULT_HOLD_WINDOW)
    }
}
