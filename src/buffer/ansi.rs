//! ANSI output: turn board changes into escape sequences.
//!
//! The terminal side is modelled by an [`AnsiCursor`]: where the cursor
//! sits and which pen is active. A flush walks only the dirty rectangles,
//! writes the cells whose content changed and skips the cursor move when
//! the next changed cell is directly to the right of the last one.
//! Everything goes into one byte buffer for a single write.

use super::{Buffer, Cell, Modifiers, Pen};
use crate::layout::Rect;
use std::io::Write;

/// What the terminal's cursor and SGR state are known to be.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiCursor {
    at: Option<(u16, u16)>,
    pen: Option<Pen>,
}

impl AnsiCursor {
    /// Nothing known about the terminal yet.
    pub const fn new() -> Self {
        Self { at: None, pen: None }
    }

    /// Drop what is known, forcing the next write to move and re-ink.
    pub fn forget(&mut self) {
        self.at = None;
        self.pen = None;
    }

    fn move_to(&mut self, out: &mut Vec<u8>, row: u16, col: u16) -> bool {
        if self.at == Some((row, col)) {
            return false;
        }
        let _ = write!(out, "\x1b[{};{}H", row + 1, col + 1);
        self.at = Some((row, col));
        true
    }

    fn ink(&mut self, out: &mut Vec<u8>, pen: Pen) -> bool {
        if self.pen == Some(pen) {
            return false;
        }
        // Always reset first so attributes the new pen lacks are dropped.
        out.extend_from_slice(b"\x1b[0");
        if pen.modifiers.contains(Modifiers::BOLD) {
            out.extend_from_slice(b";1");
        }
        if pen.modifiers.contains(Modifiers::REVERSED) {
            out.extend_from_slice(b";7");
        }
        let _ = write!(out, ";38;2;{};{};{}m", pen.fg.r, pen.fg.g, pen.fg.b);
        self.pen = Some(pen);
        true
    }

    fn put(&mut self, out: &mut Vec<u8>, cell: Cell) {
        let mut utf8 = [0u8; 4];
        out.extend_from_slice(cell.glyph().encode_utf8(&mut utf8).as_bytes());
        if let Some((_, col)) = self.at.as_mut() {
            *col += 1;
        }
    }
}

/// Counters from one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Cells written.
    pub cells: usize,
    /// Cursor moves emitted.
    pub moves: usize,
    /// Pen changes emitted.
    pub pen_changes: usize,
}

/// Write the cells inside `rects` where `frame` differs from `shown`,
/// updating `shown` as they go out.
///
/// Overlapping rectangles cost nothing extra: a cell already brought up
/// to date no longer differs.
pub fn flush_rects(
    shown: &mut Buffer,
    frame: &Buffer,
    rects: &[Rect],
    out: &mut Vec<u8>,
    cursor: &mut AnsiCursor,
) -> FlushStats {
    debug_assert_eq!(shown.area(), frame.area());
    let mut stats = FlushStats::default();
    for rect in rects {
        for row in rect.y..rect.bottom().min(frame.height()) {
            for col in rect.x..rect.right().min(frame.width()) {
                let (r, c) = (i32::from(row), i32::from(col));
                let Some(cell) = frame.get(r, c) else { continue };
                if shown.get(r, c) == Some(cell) {
                    continue;
                }
                stats.moves += usize::from(cursor.move_to(out, row, col));
                stats.pen_changes += usize::from(cursor.ink(out, cell.pen()));
                cursor.put(out, cell);
                shown.put(r, c, cell);
                stats.cells += 1;
            }
        }
    }
    stats
}

/// Repaint every row of `frame` from the top-left corner.
///
/// Used once the terminal's contents are unknown, such as right after
/// entering the alternate screen. Leaves the pen reset.
pub fn paint_all(frame: &Buffer, out: &mut Vec<u8>, cursor: &mut AnsiCursor) {
    cursor.forget();
    for row in 0..frame.height() {
        cursor.move_to(out, row, 0);
        for &cell in frame.row(row) {
            cursor.ink(out, cell.pen());
            cursor.put(out, cell);
        }
    }
    out.extend_from_slice(b"\x1b[0m");
    cursor.forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    fn text(out: &[u8]) -> String {
        String::from_utf8_lossy(out).into_owned()
    }

    fn board() -> Buffer {
        Buffer::from_lines(10, 4, &["Score:", "=-=-=-=-=-"])
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let mut shown = board();
        let mut out = Vec::new();
        let stats = flush_rects(&mut shown, &board(), &[Rect::new(0, 0, 10, 4)], &mut out, &mut AnsiCursor::new());
        assert_eq!(stats, FlushStats::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_adjacent_changes_share_one_move() {
        let mut shown = board();
        let mut frame = board();
        let ink = Pen::new(Rgb::new(0xff, 0xd7, 0x00));
        for (col, glyph) in (3..).zip("Q=o".chars()) {
            frame.put(2, col, Cell::new(glyph, ink));
        }
        let mut out = Vec::new();
        let mut cursor = AnsiCursor::new();
        let stats = flush_rects(&mut shown, &frame, &[Rect::new(3, 2, 3, 1)], &mut out, &mut cursor);

        assert_eq!(stats, FlushStats { cells: 3, moves: 1, pen_changes: 1 });
        assert_eq!(text(&out), "\x1b[3;4H\x1b[0;38;2;255;215;0mQ=o");
        assert_eq!(shown, frame);
    }

    #[test]
    fn test_only_dirty_rects_are_compared() {
        let mut shown = board();
        let mut frame = board();
        frame.put(0, 0, Cell::new('X', Pen::PLAIN));
        frame.put(3, 9, Cell::new('^', Pen::PLAIN));
        let mut out = Vec::new();
        let stats = flush_rects(&mut shown, &frame, &[Rect::new(9, 3, 1, 1)], &mut out, &mut AnsiCursor::new());
        assert_eq!(stats.cells, 1);
        assert_eq!(shown.get(0, 0).map(|cell| cell.glyph()), Some('S'));
    }

    #[test]
    fn test_overlapping_rects_write_once() {
        let mut shown = board();
        let mut frame = board();
        frame.put(1, 1, Cell::new('|', Pen::PLAIN));
        let rects = [Rect::new(0, 0, 3, 3), Rect::new(1, 1, 1, 1)];
        let mut out = Vec::new();
        let stats = flush_rects(&mut shown, &frame, &rects, &mut out, &mut AnsiCursor::new());
        assert_eq!(stats.cells, 1);
    }

    #[test]
    fn test_banner_pen_is_dropped_afterwards() {
        let banner = Pen::PLAIN.with_modifiers(Modifiers::BOLD | Modifiers::REVERSED);
        let mut shown = board();
        let mut frame = board();
        frame.put(3, 0, Cell::new('G', banner));
        frame.put(3, 1, Cell::new(' ', Pen::PLAIN));
        frame.put(3, 2, Cell::new('!', Pen::PLAIN));
        let mut out = Vec::new();
        flush_rects(&mut shown, &frame, &[Rect::new(0, 3, 3, 1)], &mut out, &mut AnsiCursor::new());
        assert_eq!(
            text(&out),
            "\x1b[4;1H\x1b[0;1;7;38;2;255;255;255mG\x1b[4;3H\x1b[0;38;2;255;255;255m!"
        );
    }

    #[test]
    fn test_paint_all_covers_every_row() {
        let mut out = Vec::new();
        let mut cursor = AnsiCursor::new();
        paint_all(&board(), &mut out, &mut cursor);
        let painted = text(&out);
        assert!(painted.starts_with("\x1b[1;1H\x1b[0;38;2;255;255;255mScore:"));
        for row in 1..=4 {
            assert!(painted.contains(&format!("\x1b[{row};1H")));
        }
        assert!(painted.ends_with("\x1b[0m"));
        assert_eq!(painted.matches("38;2").count(), 1);
    }
}
