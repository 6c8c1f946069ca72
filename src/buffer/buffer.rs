//! Buffer: the board as a flat row-major grid of cells.
//!
//! Coordinates are `(row, col)` and signed, since sprites slide off the
//! left edge and their writes must simply fall away.

use super::cell::{Cell, Pen};
use crate::layout::Rect;

/// A `height` × `width` grid of cells.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Buffer {
    /// A blank grid.
    ///
    /// # Panics
    /// Panics if either dimension is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        Self {
            cells: vec![Cell::BLANK; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// A grid showing `lines`, one per row, in the plain pen.
    ///
    /// Short lines and missing rows stay blank; long lines are cut.
    pub fn from_lines<S: AsRef<str>>(width: u16, height: u16, lines: &[S]) -> Self {
        let mut buffer = Self::new(width, height);
        for (row, line) in (0..i32::from(height)).zip(lines) {
            for (col, glyph) in (0..i32::from(width)).zip(line.as_ref().chars()) {
                buffer.put(row, col, Cell::new(glyph, Pen::PLAIN));
            }
        }
        buffer
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole grid as a rectangle.
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let row = u16::try_from(row).ok().filter(|&r| r < self.height)?;
        let col = u16::try_from(col).ok().filter(|&c| c < self.width)?;
        Some(usize::from(row) * usize::from(self.width) + usize::from(col))
    }

    /// The cell at `(row, col)`, `None` off the grid.
    #[inline]
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Write one cell. Off-grid writes are dropped and return `false`.
    #[inline]
    pub fn put(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Copy `rect` from `source`, a grid of the same size.
    pub fn restore(&mut self, source: &Self, rect: Rect) {
        debug_assert_eq!(self.area(), source.area());
        let width = usize::from(self.width);
        let cols = usize::from(rect.x)..usize::from(rect.right().min(self.width));
        for row in usize::from(rect.y)..usize::from(rect.bottom().min(self.height)) {
            let span = row * width + cols.start..row * width + cols.end;
            self.cells[span.clone()].copy_from_slice(&source.cells[span]);
        }
    }

    /// Cells of row `row`; empty past the bottom.
    pub fn row(&self, row: u16) -> &[Cell] {
        let width = usize::from(self.width);
        let start = usize::from(row) * width;
        self.cells.get(start..start + width).unwrap_or(&[])
    }

    /// The glyphs of row `row` as a string, trailing spaces kept.
    pub fn row_text(&self, row: u16) -> String {
        self.row(row).iter().map(Cell::glyph).collect()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
