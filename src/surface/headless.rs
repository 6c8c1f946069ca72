//! Headless surface: an in-memory grid that records what happened to it.

use super::{Canvas, RenderSurface};
use crate::buffer::{Buffer, Rgb};
use std::io;

/// A [`RenderSurface`] with no display behind it.
///
/// Paints land in a [`Canvas`]; refreshes, banners and keypress waits are
/// counted so tests can assert on the end-of-game sequence.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    canvas: Option<Canvas>,
    refreshes: u64,
    banners: Vec<String>,
    keypress_waits: u32,
    finished: bool,
    closed: bool,
    fail_init: bool,
}

impl HeadlessSurface {
    /// A surface that initialises normally.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose `init` reports an error.
    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }

    /// The current frame, once initialised.
    pub fn frame(&self) -> Option<&Buffer> {
        self.canvas.as_ref().map(Canvas::frame)
    }

    /// Glyph at `(row, col)`.
    pub fn glyph_at(&self, row: i32, col: i32) -> Option<char> {
        self.canvas.as_ref()?.glyph_at(row, col)
    }

    /// Text of one row.
    pub fn row_text(&self, row: u16) -> String {
        self.frame().map(|frame| frame.row_text(row)).unwrap_or_default()
    }

    /// Number of effective refreshes.
    pub const fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    /// Banners shown, in order.
    pub fn banners(&self) -> &[String] {
        &self.banners
    }

    /// How many times the end-of-game keypress was awaited.
    pub const fn keypress_waits(&self) -> u32 {
        self.keypress_waits
    }

    /// Whether `finish` has run.
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the engine closed the surface.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

impl RenderSurface for HeadlessSurface {
    fn init(&mut self, rows: u16, cols: u16, template: &[&str]) -> io::Result<()> {
        if self.fail_init {
            return Err(io::Error::new(io::ErrorKind::Unsupported, "headless init refused"));
        }
        self.canvas = Some(Canvas::new(rows, cols, template));
        Ok(())
    }

    fn draw_glyphs(&mut self, row: i32, col: i32, lines: &[&str], color: Rgb) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.draw_glyphs(row, col, lines, color);
        }
    }

    fn clear_region(&mut self, row: i32, col: i32, height: u16, width: u16) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.clear_region(row, col, height, width);
        }
    }

    fn refresh(&mut self) -> io::Result<()> {
        if let Some(canvas) = self.canvas.as_mut() {
            if !self.finished {
                canvas.take_dirty();
                self.refreshes += 1;
            }
        }
        Ok(())
    }

    fn write_text(&mut self, text: &str, row: u16, col: u16, width: u16) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.write_text(text, row, col, width);
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        self.refresh()?;
        self.finished = true;
        Ok(())
    }

    fn show_banner(&mut self, text: &str) -> io::Result<()> {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.paint_banner(text);
        }
        self.banners.push(text.to_string());
        Ok(())
    }

    fn wait_for_keypress(&mut self) -> io::Result<()> {
        self.keypress_waits += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BOARD_TEMPLATE, GAME_COLS, GAME_ROWS};

    #[test]
    fn test_paints_before_init_are_ignored() {
        let mut surface = HeadlessSurface::new();
        surface.draw_glyphs(0, 0, &["x"], Rgb::WHITE);
        assert!(surface.frame().is_none());
        assert_eq!(surface.glyph_at(0, 0), None);
    }

    #[test]
    fn test_failing_init() {
        let mut surface = HeadlessSurface::failing();
        assert!(surface.init(GAME_ROWS, GAME_COLS, &BOARD_TEMPLATE).is_err());
    }

    #[test]
    fn test_end_sequence_is_recorded() {
        let mut surface = HeadlessSurface::new();
        surface.init(GAME_ROWS, GAME_COLS, &BOARD_TEMPLATE).unwrap();
        surface.refresh().unwrap();
        surface.finish().unwrap();
        surface.refresh().unwrap();
        surface.show_banner("bye").unwrap();
        surface.wait_for_keypress().unwrap();

        assert_eq!(surface.refresh_count(), 2);
        assert!(surface.is_finished());
        assert_eq!(surface.banners(), ["bye".to_string()]);
        assert_eq!(surface.keypress_waits(), 1);
        assert!(surface.row_text(11).contains("bye"));
    }
}
