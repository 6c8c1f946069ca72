//! Canvas: the cell grid both surfaces paint into.
//!
//! Keeps the board template as a background layer so clearing a sprite
//! brings back whatever the board shows there, and records the dirty
//! rectangles since the last flush.

use crate::buffer::{Buffer, Cell, Modifiers, Pen, Rgb};
use crate::layout::{Board, Rect};
use unicode_width::UnicodeWidthChar;

const HUD_PEN: Pen = Pen::new(Rgb::new(0x5f, 0xd7, 0xff));
const BANNER_PEN: Pen = Pen::PLAIN.with_modifiers(Modifiers::BOLD.union(Modifiers::REVERSED));

/// Every cell is one column; anything wider or zero-width becomes `?`.
fn narrow(glyph: char) -> char {
    if glyph.width() == Some(1) {
        glyph
    } else {
        '?'
    }
}

/// Background + frame buffers with dirty tracking.
#[derive(Debug, Clone)]
pub struct Canvas {
    background: Buffer,
    frame: Buffer,
    dirty: Vec<Rect>,
}

impl Canvas {
    /// A canvas showing `template`.
    pub fn new<S: AsRef<str>>(rows: u16, cols: u16, template: &[S]) -> Self {
        let background = Buffer::from_lines(cols, rows, template);
        Self {
            frame: background.clone(),
            background,
            dirty: Vec::new(),
        }
    }

    /// The current frame.
    pub const fn frame(&self) -> &Buffer {
        &self.frame
    }

    /// Glyph at signed `(row, col)`, `None` off the grid.
    pub fn glyph_at(&self, row: i32, col: i32) -> Option<char> {
        self.frame.get(row, col).map(|cell| cell.glyph())
    }

    fn clip(&self, row: i32, col: i32, height: u16, width: u16) -> Option<Rect> {
        Rect::clip_signed(col, row, width, height, self.frame.area())
    }

    /// Paint `lines` with their top-left cell at `(row, col)`, clipped.
    pub fn draw_glyphs(&mut self, row: i32, col: i32, lines: &[&str], color: Rgb) {
        let pen = Pen::new(color);
        let mut widest = 0u16;
        for (dy, line) in (0..).zip(lines) {
            let mut dx = 0u16;
            for glyph in line.chars() {
                self.frame.put(row + dy, col + i32::from(dx), Cell::new(narrow(glyph), pen));
                dx = dx.saturating_add(1);
            }
            widest = widest.max(dx);
        }
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        if let Some(rect) = self.clip(row, col, height, widest) {
            self.dirty.push(rect);
        }
    }

    /// Restore the background under a `height` × `width` block at `(row, col)`.
    pub fn clear_region(&mut self, row: i32, col: i32, height: u16, width: u16) {
        if let Some(rect) = self.clip(row, col, height, width) {
            self.frame.restore(&self.background, rect);
            self.dirty.push(rect);
        }
    }

    /// Write `text` into a `width`-column field, padding or truncating it.
    pub fn write_text(&mut self, text: &str, row: u16, col: u16, width: u16) {
        let glyphs = text.chars().map(narrow).chain(std::iter::repeat(' '));
        let (row, col) = (i32::from(row), i32::from(col));
        for (dx, glyph) in (0..i32::from(width)).zip(glyphs) {
            self.frame.put(row, col + dx, Cell::new(glyph, HUD_PEN));
        }
        if let Some(rect) = self.clip(row, col, 1, width) {
            self.dirty.push(rect);
        }
    }

    /// Paint `text` as a highlighted strip centred on the banner row.
    pub fn paint_banner(&mut self, text: &str) {
        let area = self.frame.area();
        let padded: Vec<char> = format!("  {text}  ").chars().map(narrow).collect();
        let len = u16::try_from(padded.len()).unwrap_or(area.width).min(area.width);
        let row = i32::from(Board::BANNER_ROW.min(area.height.saturating_sub(1)));
        let col = i32::from((area.width - len) / 2);
        for (dx, &glyph) in (0..i32::from(len)).zip(&padded) {
            self.frame.put(row, col + dx, Cell::new(glyph, BANNER_PEN));
        }
        if let Some(rect) = self.clip(row, col, 1, len) {
            self.dirty.push(rect);
        }
    }

    /// Rectangles touched since the last call.
    pub fn take_dirty(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_restores_template() {
        let mut canvas = Canvas::new(3, 6, &["", "\"\"\"\"\"\"", ""]);
        canvas.draw_glyphs(1, 2, &["^"], Rgb::WHITE);
        assert_eq!(canvas.glyph_at(1, 2), Some('^'));
        canvas.clear_region(1, 2, 1, 1);
        assert_eq!(canvas.frame().get(1, 2), Some(Cell::new('"', Pen::PLAIN)));
    }

    #[test]
    fn test_draw_is_clipped_at_edges() {
        let mut canvas = Canvas::new(2, 5, &[""]);
        canvas.draw_glyphs(0, -2, &["abcd"], Rgb::WHITE);
        assert_eq!(canvas.frame().row_text(0), "cd   ");
        canvas.draw_glyphs(1, 3, &["xyz"], Rgb::WHITE);
        assert_eq!(canvas.frame().row_text(1), "   xy");
        assert_eq!(canvas.glyph_at(0, -1), None);
    }

    #[test]
    fn test_write_text_pads_and_truncates() {
        let mut canvas = Canvas::new(1, 12, &["Score:xxxxxx"]);
        canvas.write_text("42", 0, 6, 4);
        assert_eq!(canvas.frame().row_text(0), "Score:42  xx");
        canvas.write_text("123456", 0, 6, 4);
        assert_eq!(canvas.frame().row_text(0), "Score:1234xx");
        canvas.write_text("日1", 0, 6, 4);
        assert_eq!(canvas.frame().row_text(0), "Score:?1  xx");
    }

    #[test]
    fn test_dirty_rects_cover_paints() {
        let mut canvas = Canvas::new(24, 80, &[""]);
        canvas.draw_glyphs(20, 40, &["|", "|"], Rgb::WHITE);
        canvas.clear_region(2, -3, 1, 8);
        let dirty = canvas.take_dirty();
        assert_eq!(dirty, vec![Rect::new(40, 20, 1, 2), Rect::new(0, 2, 5, 1)]);
        assert!(canvas.take_dirty().is_empty());
    }

    #[test]
    fn test_banner_is_centred() {
        let mut canvas = Canvas::new(24, 80, &[""]);
        canvas.paint_banner("GAME OVER");
        let row = canvas.frame().row_text(Board::BANNER_ROW);
        let start = row.find("GAME OVER").unwrap();
        assert_eq!(start, (80 - 13) / 2 + 2);
        let cell = canvas.frame().get(i32::from(Board::BANNER_ROW), i32::try_from(start).unwrap()).unwrap();
        assert!(cell.pen().modifiers.contains(Modifiers::REVERSED));
    }
}
