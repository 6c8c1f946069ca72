//! Terminal surface: crossterm raw mode plus diff-based ANSI output.

use super::{Canvas, RenderSurface};
use crate::buffer::ansi::{flush_rects, paint_all, AnsiCursor};
use crate::buffer::{Buffer, Rgb};
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};

/// A [`RenderSurface`] drawing to the controlling terminal.
///
/// Paints go into a [`Canvas`]; `refresh` diffs the dirty rectangles
/// against what the terminal shows and writes the changes in one syscall.
pub struct TerminalSurface {
    canvas: Option<Canvas>,
    /// What the terminal currently shows.
    displayed: Option<Buffer>,
    ansi: AnsiCursor,
    output: Vec<u8>,
    stdout: Stdout,
    /// Refreshes after `finish` are dropped.
    finished: bool,
    /// Raw mode and the alternate screen are on.
    active: bool,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface {
    /// A surface bound to stdout. Nothing touches the terminal until `init`.
    pub fn new() -> Self {
        Self {
            canvas: None,
            displayed: None,
            ansi: AnsiCursor::new(),
            output: Vec::with_capacity(16 * 1024),
            stdout: io::stdout(),
            finished: false,
            active: false,
        }
    }

    fn flush_output(&mut self) -> io::Result<()> {
        if !self.output.is_empty() {
            self.stdout.write_all(&self.output)?;
            self.stdout.flush()?;
        }
        Ok(())
    }

    /// Diff pending paints onto the terminal.
    fn present(&mut self) -> io::Result<()> {
        let (Some(canvas), Some(displayed)) = (self.canvas.as_mut(), self.displayed.as_mut()) else {
            return Ok(());
        };
        let dirty = canvas.take_dirty();
        if dirty.is_empty() {
            return Ok(());
        }
        self.output.clear();
        let stats = flush_rects(displayed, canvas.frame(), &dirty, &mut self.output, &mut self.ansi);
        tracing::trace!(cells = stats.cells, moves = stats.moves, bytes = self.output.len(), "terminal refresh");
        self.flush_output()
    }
}

impl RenderSurface for TerminalSurface {
    fn init(&mut self, rows: u16, cols: u16, template: &[&str]) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if width < cols || height < rows {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("terminal is {width}x{height}, need at least {cols}x{rows}"),
            ));
        }

        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;

        let canvas = Canvas::new(rows, cols, template);
        self.output.clear();
        paint_all(canvas.frame(), &mut self.output, &mut self.ansi);
        self.displayed = Some(canvas.frame().clone());
        self.canvas = Some(canvas);
        self.flush_output()
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
        if self.finished {
            return Ok(());
        }
        self.present()
    }

    fn write_text(&mut self, text: &str, row: u16, col: u16, width: u16) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.write_text(text, row, col, width);
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        let result = self.present();
        self.finished = true;
        result
    }

    fn show_banner(&mut self, text: &str) -> io::Result<()> {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.paint_banner(text);
        }
        self.present()
    }

    fn wait_for_keypress(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }

    fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        self.close();
    }
}
