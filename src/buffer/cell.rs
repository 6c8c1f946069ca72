//! Cell: one character position on the board.
//!
//! Every glyph on the board is exactly one column wide, so a cell is a
//! `char` plus the [`Pen`] it was drawn with.

use bitflags::bitflags;

/// 24-bit colour.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// A colour from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Plain white, the board's ink.
    pub const WHITE: Self = Self::new(255, 255, 255);
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

bitflags! {
    /// Text attributes layered on top of the colour.
    ///
    /// ```
    /// use centipede::Modifiers;
    /// let banner = Modifiers::BOLD | Modifiers::REVERSED;
    /// assert!(banner.contains(Modifiers::REVERSED));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
    pub struct Modifiers: u8 {
        /// Bold text.
        const BOLD = 0b01;
        /// Foreground and background swapped.
        const REVERSED = 0b10;
    }
}

/// How a glyph is inked: colour plus attributes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pen {
    /// Foreground colour; the background is always the terminal's own.
    pub fg: Rgb,
    /// Attributes.
    pub modifiers: Modifiers,
}

impl Pen {
    /// White, no attributes. The board template is drawn with it.
    pub const PLAIN: Self = Self::new(Rgb::WHITE);

    /// A pen with colour `fg` and no attributes.
    pub const fn new(fg: Rgb) -> Self {
        Self {
            fg,
            modifiers: Modifiers::empty(),
        }
    }

    /// The same pen with `modifiers` added.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// A single board cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    glyph: char,
    pen: Pen,
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

impl Cell {
    /// A space in the plain pen.
    pub const BLANK: Self = Self::new(' ', Pen::PLAIN);

    /// `glyph` inked with `pen`.
    #[inline]
    pub const fn new(glyph: char, pen: Pen) -> Self {
        Self { glyph, pen }
    }

    /// The glyph.
    #[inline]
    pub const fn glyph(&self) -> char {
        self.glyph
    }

    /// The pen it was drawn with.
    #[inline]
    pub const fn pen(&self) -> Pen {
        self.pen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pen_accumulates_modifiers() {
        let pen = Pen::new(Rgb::new(255, 0, 0))
            .with_modifiers(Modifiers::BOLD)
            .with_modifiers(Modifiers::REVERSED);
        assert_eq!(pen.fg, Rgb::new(255, 0, 0));
        assert_eq!(pen.modifiers, Modifiers::BOLD | Modifiers::REVERSED);
    }

    #[test]
    fn test_cells_differ_by_pen() {
        let red = Cell::new('Q', Pen::new(Rgb::new(255, 0, 0)));
        assert_ne!(red, Cell::new('Q', Pen::PLAIN));
        assert_eq!(Cell::default(), Cell::BLANK);
        assert_eq!(format!("{:?}", red.pen().fg), "#ff0000");
    }
}
