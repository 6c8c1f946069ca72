//! Board: The fixed 24 × 80 arcade board and the regions carved out of it.
//!
//! ```text
//! row  0      HUD (score / lives)
//! row  1      title border
//! rows 2..=15 enemy field
//! row  16     barrier
//! rows 17..=23 player zone
//! ```

/// Board height in rows.
pub const GAME_ROWS: u16 = 24;
/// Board width in columns.
pub const GAME_COLS: u16 = 80;

const BORDER: &str =
    "=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-centipede!=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-";
const BARRIER: &str =
    r#""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""""#;

/// Template painted by the surface at start-up and restored under cleared sprites.
pub const BOARD_TEMPLATE: [&str; GAME_ROWS as usize] = [
    "                   Score:          Lives:",
    BORDER,
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    BARRIER,
    "",
    "",
    "",
    "",
    "",
    "",
    "",
];

/// Inclusive row/column limits for a sprite's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Smallest allowed row.
    pub top: i32,
    /// Largest allowed row.
    pub bottom: i32,
    /// Smallest allowed column.
    pub left: i32,
    /// Largest allowed column.
    pub right: i32,
}

impl Bounds {
    /// Clamp a position into these bounds.
    pub fn clamp(&self, row: i32, col: i32) -> (i32, i32) {
        (row.clamp(self.top, self.bottom), col.clamp(self.left, self.right))
    }

    /// Whether a position lies within these bounds.
    pub const fn contains(&self, row: i32, col: i32) -> bool {
        row >= self.top && row <= self.bottom && col >= self.left && col <= self.right
    }
}

/// A HUD text field: where the value goes and how wide it may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudField {
    /// Row of the field.
    pub row: u16,
    /// First column of the value.
    pub col: u16,
    /// Width reserved for the value.
    pub width: u16,
}

/// Static geometry of the board.
pub struct Board;

impl Board {
    /// Score value field.
    pub const SCORE: HudField = HudField { row: 0, col: 26, width: 8 };
    /// Lives value field.
    pub const LIVES: HudField = HudField { row: 0, col: 42, width: 4 };

    /// Where the player appears when the game starts.
    pub const PLAYER_START: (i32, i32) = (20, 40);
    /// Limits for the player's top-left cell (the sprite is two rows tall).
    pub const PLAYER_BOUNDS: Bounds = Bounds {
        top: 17,
        bottom: GAME_ROWS as i32 - 2,
        left: 0,
        right: GAME_COLS as i32 - 1,
    };

    /// A projectile at or above this row is gone.
    pub const PROJECTILE_TOP_MARGIN: i32 = 2;
    /// A projectile at or below this row is gone.
    pub const PROJECTILE_BOTTOM_BOUND: i32 = GAME_ROWS as i32 - 1;

    /// Row the enemy chain enters on.
    pub const ENEMY_START_ROW: i32 = 2;
    /// Last row an enemy sweep may start on; below it the segment is done.
    pub const ENEMY_BOTTOM_ROW: i32 = 14;

    /// Banner row used by the end-of-game sequence.
    pub const BANNER_ROW: u16 = 11;
}
