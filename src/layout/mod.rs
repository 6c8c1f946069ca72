//! Layout module: Static board geometry.
//!
//! The board never resizes, so every region is a constant computed up
//! front. Actors clamp and bounds-check against these values.

mod board;
mod rect;

pub use board::{Board, Bounds, HudField, BOARD_TEMPLATE, GAME_COLS, GAME_ROWS};
pub use rect::Rect;
