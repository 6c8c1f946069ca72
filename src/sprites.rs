//! Sprite glyph tables.
//!
//! Every animated sprite has [`ANIM_FRAMES`] frames; each frame is a list
//! of equally wide text lines drawn top to bottom.

use crate::buffer::Rgb;

/// Frames in every animation cycle.
pub const ANIM_FRAMES: usize = 4;

/// A multi-frame glyph block with a paint colour.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    frames: &'static [&'static [&'static str]],
    color: Rgb,
}

impl Sprite {
    /// Lines of frame `n` (wraps around the cycle).
    pub fn frame(&self, n: usize) -> &'static [&'static str] {
        self.frames[n % self.frames.len()]
    }

    /// Rows covered by one frame.
    pub fn height(&self) -> u16 {
        u16::try_from(self.frames[0].len()).unwrap_or(u16::MAX)
    }

    /// Columns covered by one frame.
    pub fn width(&self) -> u16 {
        let widest = self.frames[0].iter().map(|line| line.chars().count()).max().unwrap_or(0);
        u16::try_from(widest).unwrap_or(u16::MAX)
    }

    /// Paint colour.
    pub const fn color(&self) -> Rgb {
        self.color
    }
}

/// The player: a two-row stalk whose foot spins.
pub const PLAYER: Sprite = Sprite {
    frames: &[&["|", "|"], &["|", "/"], &["|", "-"], &["|", "\\"]],
    color: Rgb::new(0x5f, 0xd7, 0x5f),
};

/// Enemy chain crawling leftward, head first.
pub const ENEMY_LEFTWARD: Sprite = Sprite {
    frames: &[&["Q=o=o=o="], &["Q-o-o-o-"], &["Q=O=O=O="], &["Q-O-O-O-"]],
    color: Rgb::new(0xff, 0xd7, 0x00),
};

/// Enemy chain crawling rightward: the leftward frames mirrored.
pub const ENEMY_RIGHTWARD: Sprite = Sprite {
    frames: &[&["=o=o=o=Q"], &["-o-o-o-Q"], &["=O=O=O=Q"], &["-O-O-O-Q"]],
    color: Rgb::new(0xff, 0xd7, 0x00),
};

/// A shot travelling up the board.
pub const PROJECTILE_UP: Sprite = Sprite {
    frames: &[&["^"]],
    color: Rgb::WHITE,
};

/// A shot travelling down the board.
pub const PROJECTILE_DOWN: Sprite = Sprite {
    frames: &[&["v"]],
    color: Rgb::WHITE,
};
