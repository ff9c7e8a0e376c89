//! Rendering module
//!
//! `scene::render` turns game state into a `Frame` of draw primitives;
//! sinks such as `terminal::TerminalSink` put those on screen.

pub mod frame;
pub mod scene;
pub mod terminal;

pub use frame::{Color, DrawCommand, Frame, RenderSink, colors};
pub use scene::render;
pub use terminal::TerminalSink;
