//! Player actor: animates the player sprite.

use super::Pacer;
use crate::error::EngineError;
use crate::sprites;
use crate::state::{PlayerState, Shared};
use crate::surface::RenderSurface;
use std::sync::Arc;
use std::time::Duration;

/// Erase the player sprite at its current position.
pub(crate) fn erase_player<S: RenderSurface>(surface: &mut S, player: &PlayerState) {
    let sprite = sprites::PLAYER;
    surface.clear_region(player.row(), player.col(), sprite.height(), sprite.width());
}

/// Draw the player's current frame at its current position.
pub(crate) fn draw_player<S: RenderSurface>(surface: &mut S, player: &PlayerState) {
    let sprite = sprites::PLAYER;
    surface.draw_glyphs(player.row(), player.col(), sprite.frame(player.anim_frame()), sprite.color());
}

/// Cycles the player sprite through its animation once per tick.
pub struct PlayerActor<S> {
    shared: Arc<Shared<S>>,
    tick: Duration,
}

impl<S: RenderSurface> PlayerActor<S> {
    /// An actor animating the player in `shared`.
    pub const fn new(shared: Arc<Shared<S>>, tick: Duration) -> Self {
        Self { shared, tick }
    }

    /// Redraw the current frame and step the animation.
    pub fn step(&self) {
        self.shared.with_player(|player, screen| {
            screen.paint(|surface| {
                erase_player(surface, player);
                draw_player(surface, player);
            });
            player.advance_frame();
        });
    }

    /// Animate until the game stops.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other actors.
    pub fn run(self) -> Result<(), EngineError> {
        let mut pacer = Pacer::new(self.tick);
        while self.shared.is_running() {
            self.step();
            pacer.wait();
        }
        tracing::debug!(ticks = pacer.ticks(), "player actor done");
        Ok(())
    }
}
