//! Input actor: turns keystrokes into player moves, shots and quit.
//!
//! The only actor that mutates the player position, fires projectiles, or
//! stops the game on purpose.

use super::keys::KeySource;
use super::messages::{Command, Direction, ShotCommand};
use super::player::{draw_player, erase_player};
use super::ProjectileActor;
use crate::error::EngineError;
use crate::state::Shared;
use crate::surface::RenderSurface;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Text of the end-of-game banner.
pub const GAME_OVER_BANNER: &str = "GAME OVER - press any key";

/// Keyboard-driven controller for the player.
pub struct InputActor<S, K> {
    shared: Arc<Shared<S>>,
    keys: K,
    tick: Duration,
}

impl<S, K> InputActor<S, K>
where
    S: RenderSurface + 'static,
    K: KeySource,
{
    /// An actor reading `keys` and acting on `shared`.
    pub const fn new(shared: Arc<Shared<S>>, keys: K, tick: Duration) -> Self {
        Self { shared, keys, tick }
    }

    /// Apply one command.
    pub fn handle(&self, command: Command) {
        if let Some((d_row, d_col)) = command.delta() {
            self.shift_player(d_row, d_col);
            return;
        }
        match command {
            Command::Shoot => {
                if let Err(err) = self.fire() {
                    tracing::error!(error = %err, "shot dropped");
                }
            }
            Command::Quit => self.quit(),
            _ => {}
        }
    }

    /// Move the player, clearing and redrawing it in one paint.
    fn shift_player(&self, d_row: i32, d_col: i32) {
        self.shared.with_player(|player, screen| {
            screen.paint(|surface| {
                erase_player(surface, player);
                player.shift(d_row, d_col);
                draw_player(surface, player);
            });
        });
    }

    /// Launch an upward projectile from the player's position.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Spawn`] if the projectile thread could not
    /// be started.
    pub fn fire(&self) -> Result<(), EngineError> {
        let player = self.shared.player_snapshot();
        let shot = ShotCommand {
            row: player.row(),
            col: player.col(),
            direction: Direction::Up,
        };
        ProjectileActor::launch(Arc::clone(&self.shared), shot, self.tick)
    }

    /// Stop the game and run the end-of-game sequence.
    ///
    /// Other actors stay blocked on the run flag until the player has
    /// dismissed the banner.
    fn quit(&self) {
        let outcome = self.shared.stop_with(|screen| {
            screen.paint(|surface| -> io::Result<()> {
                surface.finish()?;
                surface.show_banner(GAME_OVER_BANNER)?;
                surface.wait_for_keypress()
            })
        });
        match outcome {
            Some(Ok(())) => tracing::info!("player quit"),
            Some(Err(err)) => tracing::warn!(error = %err, "end-of-game sequence failed"),
            None => tracing::debug!("quit after the game had already stopped"),
        }
    }

    /// Read keys until the game stops.
    ///
    /// A key source failure stops the game without the banner.
    ///
    /// # Errors
    ///
    /// Never fails; key errors end the game instead.
    pub fn run(mut self) -> Result<(), EngineError> {
        while self.shared.is_running() {
            match self.keys.next_key(self.tick) {
                Ok(Some(key)) => {
                    if let Some(command) = Command::from_key(key) {
                        self.handle(command);
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "key source failed, stopping game");
                    self.shared.stop();
                    break;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{KeyCode, ScriptedKeys};
    use crate::layout::{Board, BOARD_TEMPLATE, GAME_COLS, GAME_ROWS};
    use crate::state::{PlayerState, StatsState};
    use crate::surface::HeadlessSurface;

    fn actor() -> InputActor<HeadlessSurface, ScriptedKeys> {
        let mut surface = HeadlessSurface::new();
        surface.init(GAME_ROWS, GAME_COLS, &BOARD_TEMPLATE).unwrap();
        let shared = Shared::new(surface, PlayerState::new(20, 40), StatsState::new(0, 3));
        let (_tx, keys) = ScriptedKeys::channel();
        InputActor::new(Arc::new(shared), keys, Duration::from_millis(1))
    }

    #[test]
    fn test_move_redraws_player() {
        let input = actor();
        input.handle(Command::MoveRight);
        assert_eq!(input.shared.player_snapshot().col(), 41);
        input.shared.with_screen(|surface| {
            assert_eq!(surface.glyph_at(20, 41), Some('|'));
            assert_eq!(surface.glyph_at(20, 40), Some(' '));
        });
    }

    #[test]
    fn test_moves_are_clamped() {
        let input = actor();
        for _ in 0..10 {
            input.handle(Command::MoveUp);
        }
        assert_eq!(input.shared.player_snapshot().row(), Board::PLAYER_BOUNDS.top);
        input.shared.with_screen(|surface| {
            assert!(surface.row_text(16).chars().all(|c| c == '"'));
        });
    }

    #[test]
    fn test_quit_runs_end_sequence_once() {
        let input = actor();
        input.handle(Command::Quit);
        input.handle(Command::Quit);
        assert!(!input.shared.is_running());
        input.shared.with_screen(|surface| {
            assert!(surface.is_finished());
            assert_eq!(surface.banners(), [GAME_OVER_BANNER.to_string()]);
            assert_eq!(surface.keypress_waits(), 1);
        });
    }

    #[test]
    fn test_disconnected_keys_stop_the_game() {
        let input = actor();
        let shared = Arc::clone(&input.shared);
        assert!(input.run().is_ok());
        assert!(!shared.is_running());
        shared.with_screen(|surface| assert!(surface.banners().is_empty()));
    }

    #[test]
    fn test_quit_key_ends_run() {
        let mut surface = HeadlessSurface::new();
        surface.init(GAME_ROWS, GAME_COLS, &BOARD_TEMPLATE).unwrap();
        let shared = Arc::new(Shared::new(surface, PlayerState::new(20, 40), StatsState::new(0, 3)));
        let (tx, keys) = ScriptedKeys::channel();
        tx.send(KeyCode::Char('d')).unwrap();
        tx.send(KeyCode::Char('q')).unwrap();
        let input = InputActor::new(Arc::clone(&shared), keys, Duration::from_millis(1));
        assert!(input.run().is_ok());
        assert_eq!(shared.player_snapshot().col(), 41);
        shared.with_screen(|surface| assert_eq!(surface.banners().len(), 1));
    }
}
