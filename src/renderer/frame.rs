//! Draw primitives and the sink that presents them
//!
//! A `Frame` is a flat, ordered list of immediate-mode draw commands in
//! arena coordinates. Sinks replay it onto whatever surface they own.

use glam::Vec2;

/// RGB color with components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert to 8-bit channels
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0.1, 0.1, 0.1);
    pub const BALL: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const PADDLE: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const BRICK: Color = Color::rgb(1.0, 0.4, 0.4);
    pub const HUD_TEXT: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GAME_OVER_TEXT: Color = Color::rgb(1.0, 0.0, 0.0);
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled disc
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Filled axis-aligned rectangle, `origin` is the top-left corner
    Rect {
        origin: Vec2,
        size: Vec2,
        color: Color,
    },
    /// Text with its baseline starting at `pos`
    Text {
        pos: Vec2,
        text: String,
        color: Color,
    },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear: Color,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(clear: Color) -> Self {
        Self {
            clear,
            commands: Vec::new(),
        }
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color,
        });
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, color: Color) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.into(),
            color,
        });
    }

    /// All text strings in draw order
    #[cfg(test)]
    pub(crate) fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Replay the frame onto a sink and present it
    pub fn draw<S: RenderSink + ?Sized>(&self, sink: &mut S) -> std::io::Result<()> {
        sink.begin(self.clear);
        for command in &self.commands {
            match command {
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => sink.fill_circle(*center, *radius, *color),
                DrawCommand::Rect {
                    origin,
                    size,
                    color,
                } => sink.fill_rect(*origin, *size, *color),
                DrawCommand::Text { pos, text, color } => sink.text(*pos, text, *color),
            }
        }
        sink.present()
    }
}

/// A surface that accepts draw primitives in arena coordinates.
///
/// Drawing goes to a back buffer; nothing is visible until `present`.
pub trait RenderSink {
    /// Start a new frame cleared to `clear`
    fn begin(&mut self, clear: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    fn text(&mut self, pos: Vec2, text: &str, color: Color);
    /// Show the back buffer
    fn present(&mut self) -> std::io::Result<()>;
}
