//! Platform abstraction layer
//!
//! Handles host concerns the simulation stays out of:
//! - Time/ticks (`time`)
//! - Input events (`input`)

pub mod input;
pub mod time;

pub use input::{Action, KeyTracker};
pub use time::{Clock, FixedTicker, ManualClock, SystemClock};
