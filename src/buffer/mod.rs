//! Buffer module: the character grid behind the render surfaces.
//!
//! - [`Cell`]: one glyph and the [`Pen`] it is inked with
//! - [`Buffer`]: the board as a grid of cells
//! - [`ansi`]: dirty-rect flushing to escape sequences

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod ansi;

pub use buffer::Buffer;
pub use cell::{Cell, Modifiers, Pen, Rgb};
