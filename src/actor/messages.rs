//! Message types for actor communication.
//!
//! Keys come in from a [`KeySource`](super::KeySource), are mapped to
//! [`Command`]s by the input actor, and shots leave it as [`ShotCommand`]s
//! moved into fresh projectile actors.

use crate::sprites::{self, Sprite};

/// Key codes the game reacts to.
///
/// A small subset of crossterm's `KeyCode`; everything else is dropped at
/// the keyboard boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Esc,
}

/// What a keystroke asks the input actor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// One column left.
    MoveLeft,
    /// One column right.
    MoveRight,
    /// One row up.
    MoveUp,
    /// One row down.
    MoveDown,
    /// Fire a projectile from the player.
    Shoot,
    /// End the game.
    Quit,
}

impl Command {
    /// Map a key to a command. Unbound keys yield `None`.
    pub const fn from_key(key: KeyCode) -> Option<Self> {
        Some(match key {
            KeyCode::Char('a') | KeyCode::Left => Self::MoveLeft,
            KeyCode::Char('d') | KeyCode::Right => Self::MoveRight,
            KeyCode::Char('w') | KeyCode::Up => Self::MoveUp,
            KeyCode::Char('s') | KeyCode::Down => Self::MoveDown,
            KeyCode::Char(' ') => Self::Shoot,
            KeyCode::Char('q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        })
    }

    /// `(d_row, d_col)` for movement commands.
    pub const fn delta(self) -> Option<(i32, i32)> {
        match self {
            Self::MoveLeft => Some((0, -1)),
            Self::MoveRight => Some((0, 1)),
            Self::MoveUp => Some((-1, 0)),
            Self::MoveDown => Some((1, 0)),
            Self::Shoot | Self::Quit => None,
        }
    }
}

/// Vertical travel direction of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the bottom row.
    Down,
}

impl Direction {
    /// Row change per tick.
    pub const fn delta(self) -> i32 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }

    /// Glyph drawn for a projectile travelling this way.
    pub const fn sprite(self) -> Sprite {
        match self {
            Self::Up => sprites::PROJECTILE_UP,
            Self::Down => sprites::PROJECTILE_DOWN,
        }
    }
}

/// Launch parameters for one projectile.
///
/// Built by the input actor and moved into the projectile's thread, which
/// owns it from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotCommand {
    /// Starting row.
    pub row: i32,
    /// Column, fixed for the projectile's lifetime.
    pub col: i32,
    /// Travel direction.
    pub direction: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(Command::from_key(KeyCode::Char('a')), Some(Command::MoveLeft));
        assert_eq!(Command::from_key(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(Command::from_key(KeyCode::Char('w')), Some(Command::MoveUp));
        assert_eq!(Command::from_key(KeyCode::Down), Some(Command::MoveDown));
        assert_eq!(Command::from_key(KeyCode::Char(' ')), Some(Command::Shoot));
        assert_eq!(Command::from_key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(Command::from_key(KeyCode::Char('x')), None);
        assert_eq!(Command::from_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_only_moves_have_deltas() {
        assert_eq!(Command::MoveUp.delta(), Some((-1, 0)));
        assert_eq!(Command::Shoot.delta(), None);
        assert_eq!(Command::Quit.delta(), None);
    }
}
