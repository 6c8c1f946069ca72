//! HUD actor: paints score and lives, then flushes the surface.
//!
//! This is the only actor that calls `refresh` during play, so its period
//! is the display's frame rate.

use super::Pacer;
use crate::error::EngineError;
use crate::layout::{Board, HudField};
use crate::state::Shared;
use crate::surface::RenderSurface;
use std::sync::Arc;
use std::time::Duration;

/// Periodic score/lives painter.
pub struct HudActor<S> {
    shared: Arc<Shared<S>>,
    tick: Duration,
}

fn write_field<S: RenderSurface>(surface: &mut S, field: HudField, text: &str) {
    surface.write_text(text, field.row, field.col, field.width);
}

impl<S: RenderSurface> HudActor<S> {
    /// An actor painting the HUD of `shared`.
    pub const fn new(shared: Arc<Shared<S>>, tick: Duration) -> Self {
        Self { shared, tick }
    }

    /// Paint the counters and refresh once.
    pub fn step(&self) {
        let flushed = self.shared.with_stats(|stats, screen| {
            let score = stats.score().to_string();
            let lives = stats.lives().to_string();
            screen.paint(|surface| {
                write_field(surface, Board::SCORE, &score);
                write_field(surface, Board::LIVES, &lives);
                surface.refresh()
            })
        });
        if let Err(err) = flushed {
            tracing::warn!(error = %err, "refresh failed");
        }
    }

    /// Paint until the game stops.
    ///
    /// # Errors
    ///
    /// Never fails; refresh errors are logged.
    pub fn run(self) -> Result<(), EngineError> {
        let mut pacer = Pacer::new(self.tick);
        while self.shared.is_running() {
            self.step();
            pacer.wait();
        }
        tracing::debug!(frames = pacer.ticks(), "hud actor done");
        Ok(())
    }
}
