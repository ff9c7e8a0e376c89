//! Terminal render sink
//!
//! Maps the 480x320 arena onto the terminal's character grid. Shapes are
//! rasterized into an off-screen cell buffer by sampling each cell's center;
//! `present` writes the whole buffer with one flush.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Print},
};
use glam::Vec2;

use super::frame::{Color, RenderSink, colors};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// One character cell of the back buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: colors::HUD_TEXT,
            bg,
        }
    }
}

fn to_term(c: Color) -> style::Color {
    let (r, g, b) = c.to_rgb8();
    style::Color::Rgb { r, g, b }
}

/// Double-buffered terminal surface
pub struct TerminalSink<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    back: Vec<Cell>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            out,
            cols,
            rows,
            back: vec![Cell::blank(colors::BACKGROUND); cols as usize * rows as usize],
        }
    }

    /// Follow a terminal resize. The next frame redraws everything.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.back = vec![Cell::blank(colors::BACKGROUND); self.cols as usize * self.rows as usize];
    }

    #[cfg(test)]
    pub(crate) fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Cell in the back buffer, if on screen
    #[cfg(test)]
    pub(crate) fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.back.get(row as usize * self.cols as usize + col as usize)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Arena units per cell, horizontally and vertically
    fn scale(&self) -> Vec2 {
        Vec2::new(
            ARENA_WIDTH / self.cols as f32,
            ARENA_HEIGHT / self.rows as f32,
        )
    }

    /// Arena position of a cell's center
    fn cell_center(&self, col: i32, row: i32) -> Vec2 {
        (Vec2::new(col as f32, row as f32) + Vec2::splat(0.5)) * self.scale()
    }

    /// Cell holding an arena position (may be off screen)
    fn cell_at(&self, p: Vec2) -> (i32, i32) {
        let c = p / self.scale();
        (c.x.floor() as i32, c.y.floor() as i32)
    }

    fn paint(&mut self, col: i32, row: i32, color: Color) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.back[idx] = Cell::blank(color);
    }

    /// Half-open span of cells whose centers fall in `[lo, hi)` on one axis
    fn span(lo: f32, hi: f32, scale: f32) -> (i32, i32) {
        let start = (lo / scale - 0.5).ceil() as i32;
        let end = (hi / scale - 0.5).ceil() as i32;
        if end > start {
            (start, end)
        } else {
            // Thinner than a cell: take the one under the middle
            let mid = ((lo + hi) / 2.0 / scale).floor() as i32;
            (mid, mid + 1)
        }
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn begin(&mut self, clear: Color) {
        self.back.fill(Cell::blank(clear));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let (min_c, min_r) = self.cell_at(center - Vec2::splat(radius));
        let (max_c, max_r) = self.cell_at(center + Vec2::splat(radius));
        for row in min_r..=max_r {
            for col in min_c..=max_c {
                if self.cell_center(col, row).distance(center) <= radius {
                    self.paint(col, row, color);
                }
            }
        }
        // Small discs must stay visible on coarse grids
        let (c, r) = self.cell_at(center);
        self.paint(c, r, color);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        let scale = self.scale();
        let (c0, c1) = Self::span(origin.x, origin.x + size.x, scale.x);
        let (r0, r1) = Self::span(origin.y, origin.y + size.y, scale.y);
        for row in r0..r1 {
            for col in c0..c1 {
                self.paint(col, row, color);
            }
        }
    }

    fn text(&mut self, pos: Vec2, text: &str, color: Color) {
        let (col, row) = self.cell_at(pos);
        if row < 0 || row >= self.rows as i32 {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let c = col + i as i32;
            if c < 0 {
                continue;
            }
            if c >= self.cols as i32 {
                break;
            }
            let idx = row as usize * self.cols as usize + c as usize;
            let cell = &mut self.back[idx];
            cell.ch = ch;
            cell.fg = color;
        }
    }

    fn present(&mut self) -> std::io::Result<()> {
        let cols = self.cols as usize;
        for (row, line) in self.back.chunks(cols).enumerate() {
            self.out.queue(cursor::MoveTo(0, row as u16))?;

            // Emit runs of identically colored cells
            let mut run = String::with_capacity(cols);
            let mut run_colors: Option<(Color, Color)> = None;
            for cell in line {
                if run_colors != Some((cell.fg, cell.bg)) {
                    if let Some((fg, bg)) = run_colors {
                        self.out.queue(style::SetForegroundColor(to_term(fg)))?;
                        self.out.queue(style::SetBackgroundColor(to_term(bg)))?;
                        self.out.queue(Print(&run))?;
                        run.clear();
                    }
                    run_colors = Some((cell.fg, cell.bg));
                }
                run.push(cell.ch);
            }
            if let Some((fg, bg)) = run_colors {
                self.out.queue(style::SetForegroundColor(to_term(fg)))?;
                self.out.queue(style::SetBackgroundColor(to_term(bg)))?;
                self.out.queue(Print(&run))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 48x32 cells -> every cell is 10x10 arena units
    fn sink() -> TerminalSink<Vec<u8>> {
        TerminalSink::new(Vec::new(), 48, 32)
    }

    #[test]
    fn test_rect_covers_cells_by_center() {
        let mut s = sink();
        s.begin(colors::BACKGROUND);
        s.fill_rect(Vec2::new(35.0, 30.0), Vec2::new(75.0, 20.0), colors::BRICK);

        // Centers at x = 35..110 -> cols 3..=10 (centers 35..105)
        assert_eq!(s.cell(2, 3).unwrap().bg, colors::BACKGROUND);
        assert_eq!(s.cell(3, 3).unwrap().bg, colors::BRICK);
        assert_eq!(s.cell(10, 4).unwrap().bg, colors::BRICK);
        assert_eq!(s.cell(11, 4).unwrap().bg, colors::BACKGROUND);
        assert_eq!(s.cell(5, 5).unwrap().bg, colors::BACKGROUND);
    }

    #[test]
    fn test_thin_rect_still_visible() {
        let mut s = TerminalSink::new(Vec::new(), 10, 4); // 48x80 per cell
        s.begin(colors::BACKGROUND);
        s.fill_rect(Vec2::new(202.5, 305.0), Vec2::new(75.0, 10.0), colors::PADDLE);
        let painted = (0..10)
            .flat_map(|c| (0..4).map(move |r| (c, r)))
            .filter(|&(c, r)| s.cell(c, r).unwrap().bg == colors::PADDLE)
            .count();
        assert!(painted >= 1);
    }

    #[test]
    fn test_circle_always_marks_center_cell() {
        let mut s = TerminalSink::new(Vec::new(), 4, 4); // 120x80 per cell
        s.begin(colors::BACKGROUND);
        s.fill_circle(Vec2::new(240.0, 160.0), 8.0, colors::BALL);
        assert_eq!(s.cell(2, 2).unwrap().bg, colors::BALL);
    }

    #[test]
    fn test_circle_offscreen_is_clipped() {
        let mut s = sink();
        s.begin(colors::BACKGROUND);
        s.fill_circle(Vec2::new(-50.0, 400.0), 8.0, colors::BALL);
        assert!(s.back.iter().all(|c| c.bg == colors::BACKGROUND));
    }

    #[test]
    fn test_text_is_clipped_at_right_edge() {
        let mut s = sink();
        s.begin(colors::BACKGROUND);
        s.text(Vec2::new(460.0, 20.0), "Score: 10", colors::HUD_TEXT);
        assert_eq!(s.cell(46, 2).unwrap().ch, 'S');
        assert_eq!(s.cell(47, 2).unwrap().ch, 'c');
    }

    #[test]
    fn test_present_writes_text() {
        let mut s = sink();
        s.begin(colors::BACKGROUND);
        s.text(Vec2::new(10.0, 20.0), "Time: 60", colors::HUD_TEXT);
        s.present().unwrap();
        let bytes = s.into_inner();
        let out = String::from_utf8_lossy(&bytes);
        assert!(out.contains("Time: 60"));
    }

    #[test]
    fn test_resize_resets_buffer() {
        let mut s = sink();
        s.resize(20, 10);
        assert_eq!(s.size(), (20, 10));
        assert!(s.cell(19, 9).is_some());
        assert!(s.cell(20, 9).is_none());
    }
}
