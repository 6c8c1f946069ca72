//! Render surfaces: where the actors' paints end up.
//!
//! The engine only talks to the [`RenderSurface`] trait. Every method but
//! [`init`](RenderSurface::init) is called with the screen lock held, so
//! implementations never see two paints at once.
//!
//! - [`TerminalSurface`]: crossterm raw mode, alternate screen, diff-based
//!   ANSI output.
//! - [`HeadlessSurface`]: in-memory grid with counters, for tests and
//!   benchmarks.

mod canvas;
mod headless;
mod terminal;

pub use canvas::Canvas;
pub use headless::HeadlessSurface;
pub use terminal::TerminalSurface;

use crate::buffer::Rgb;
use std::io;

/// Paint operations over a fixed character grid.
pub trait RenderSurface: Send {
    /// Allocate the grid and show the initial board.
    fn init(&mut self, rows: u16, cols: u16, template: &[&str]) -> io::Result<()>;

    /// Draw `lines` with their top-left cell at `(row, col)`, clipped to the grid.
    fn draw_glyphs(&mut self, row: i32, col: i32, lines: &[&str], color: Rgb);

    /// Erase a `height` × `width` block back to the board background.
    fn clear_region(&mut self, row: i32, col: i32, height: u16, width: u16);

    /// Push pending paints to the display.
    fn refresh(&mut self) -> io::Result<()>;

    /// Write HUD text into a `width`-column field.
    fn write_text(&mut self, text: &str, row: u16, col: u16, width: u16);

    /// Flush the last game frame; later refreshes are ignored.
    fn finish(&mut self) -> io::Result<()>;

    /// Show the end-of-game banner.
    fn show_banner(&mut self, text: &str) -> io::Result<()>;

    /// Block until the player presses a key.
    fn wait_for_keypress(&mut self) -> io::Result<()>;

    /// Release the display. Called once by the engine after all actors stop.
    fn close(&mut self) {}
}
