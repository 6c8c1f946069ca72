//! Projectile actors: short-lived, fire-and-forget.
//!
//! Each shot gets its own thread that owns the [`ShotCommand`] it was
//! launched with. Nothing joins it; a [`ProjectileTicket`] held for the
//! thread's lifetime lets the engine see when the last one is gone.

use super::messages::{Direction, ShotCommand};
use super::Pacer;
use crate::error::EngineError;
use crate::layout::Board;
use crate::state::{ProjectileTicket, Shared};
use crate::surface::RenderSurface;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Lifecycle of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Still on the board.
    Moving,
    /// Crossed a boundary row.
    Terminated,
}

/// A single shot travelling along one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projectile {
    row: i32,
    col: i32,
    direction: Direction,
    phase: Phase,
}

impl Projectile {
    /// A projectile sitting at the shot's origin.
    pub const fn new(shot: ShotCommand) -> Self {
        Self {
            row: shot.row,
            col: shot.col,
            direction: shot.direction,
            phase: Phase::Moving,
        }
    }

    /// Current row.
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Column.
    pub const fn col(&self) -> i32 {
        self.col
    }

    /// Current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Move one row. The projectile terminates on reaching the top margin
    /// or the bottom bound.
    pub fn advance(&mut self) -> Phase {
        if self.phase == Phase::Moving {
            self.row += self.direction.delta();
            if self.row <= Board::PROJECTILE_TOP_MARGIN || self.row >= Board::PROJECTILE_BOTTOM_BOUND {
                self.phase = Phase::Terminated;
            }
        }
        self.phase
    }

    fn draw<S: RenderSurface>(&self, surface: &mut S) {
        let sprite = self.direction.sprite();
        surface.draw_glyphs(self.row, self.col, sprite.frame(0), sprite.color());
    }

    fn erase_at<S: RenderSurface>(&self, surface: &mut S, row: i32) {
        let sprite = self.direction.sprite();
        surface.clear_region(row, self.col, sprite.height(), sprite.width());
    }
}

/// Thread body for one projectile.
pub struct ProjectileActor<S> {
    shared: Arc<Shared<S>>,
    projectile: Projectile,
    tick: Duration,
    ticket: ProjectileTicket,
}

impl<S: RenderSurface + 'static> ProjectileActor<S> {
    /// Register and start a projectile. The thread is detached.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Spawn`] if the thread could not be started;
    /// the registration is undone.
    pub fn launch(shared: Arc<Shared<S>>, shot: ShotCommand, tick: Duration) -> Result<(), EngineError> {
        let ticket = shared.projectiles().enter();
        let id = ticket.id();
        let actor = Self {
            shared,
            projectile: Projectile::new(shot),
            tick,
            ticket,
        };
        thread::Builder::new()
            .name(format!("centipede-projectile-{id}"))
            .spawn(move || actor.run())
            .map_err(|source| EngineError::Spawn {
                actor: "projectile",
                source,
            })?;
        tracing::trace!(id, row = shot.row, col = shot.col, "projectile launched");
        Ok(())
    }

    fn run(mut self) {
        let mut pacer = Pacer::new(self.tick);
        let mut drawn_row = None;
        loop {
            pacer.wait();
            if !self.shared.is_running() {
                break;
            }
            let previous = drawn_row;
            if self.projectile.advance() == Phase::Terminated {
                break;
            }
            let projectile = self.projectile;
            self.shared.with_screen(|surface| {
                if let Some(row) = previous {
                    projectile.erase_at(surface, row);
                }
                projectile.draw(surface);
            });
            drawn_row = Some(projectile.row());
        }
        if let Some(row) = drawn_row {
            let projectile = self.projectile;
            self.shared.with_screen(|surface| projectile.erase_at(surface, row));
        }
        tracing::trace!(id = self.ticket.id(), ticks = pacer.ticks(), "projectile done");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_until_terminated(row: i32, direction: Direction) -> i32 {
        let mut projectile = Projectile::new(ShotCommand { row, col: 40, direction });
        let mut ticks = 0;
        while projectile.phase() == Phase::Moving {
            projectile.advance();
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_upward_lifetime() {
        for row in 3..23 {
            assert_eq!(ticks_until_terminated(row, Direction::Up), row - 2);
        }
    }

    #[test]
    fn test_downward_lifetime() {
        for row in 3..23 {
            assert_eq!(ticks_until_terminated(row, Direction::Down), 23 - row);
        }
    }

    #[test]
    fn test_terminated_stays_put() {
        let mut projectile = Projectile::new(ShotCommand {
            row: 3,
            col: 5,
            direction: Direction::Up,
        });
        assert_eq!(projectile.advance(), Phase::Terminated);
        assert_eq!(projectile.advance(), Phase::Terminated);
        assert_eq!(projectile.row(), 2);
        assert_eq!(projectile.col(), 5);
    }
}
