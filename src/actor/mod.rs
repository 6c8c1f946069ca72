//! Actors: one OS thread per game object.
//!
//! Actors share nothing but [`Shared`] and never message each other; all
//! coordination goes through its locks and the run flag.
//!
//! # Architecture
//!
//! ```text
//!                       ┌──────────┐
//!                       │  Engine  │ spawns + joins
//!                       └────┬─────┘
//!        ┌───────────┬───────┴─────┬─────────────┐
//!        ▼           ▼             ▼             ▼
//!   ┌────────┐  ┌─────────┐  ┌───────────┐  ┌─────────┐
//!   │ Player │  │  Input  │  │    HUD    │  │ Spawner │
//!   └────────┘  └────┬────┘  └───────────┘  └────┬────┘
//!                    │ fire-and-forget           │ joins
//!                    ▼                           ▼
//!              ┌────────────┐              ┌──────────┐
//!              │ Projectile │ × n          │ Segment  │ × n
//!              └────────────┘              └──────────┘
//! ```
//!
//! Every periodic actor checks the run flag once per tick, so a stop is
//! observed within one period.

mod engine;
mod enemy;
mod hud;
mod input;
mod keys;
mod messages;
mod pacer;
mod player;
mod projectile;

pub use engine::{Engine, RunReport};
pub use enemy::{EnemySegment, EnemySpawner, Heading, Placement, SegmentActor};
pub use hud::HudActor;
pub use input::{InputActor, GAME_OVER_BANNER};
pub use keys::{KeySource, ScriptedKeys, TerminalKeys};
pub use messages::{Command, Direction, KeyCode, ShotCommand};
pub use pacer::Pacer;
pub use player::PlayerActor;
pub use projectile::{Phase, Projectile, ProjectileActor};

use crate::error::EngineError;
use crate::state::Shared;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A running long-lived actor.
#[derive(Debug)]
pub struct ActorHandle {
    name: &'static str,
    handle: JoinHandle<Result<(), EngineError>>,
}

impl ActorHandle {
    /// Actor name, as used in logs and errors.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Wait for the actor to finish.
    ///
    /// # Errors
    ///
    /// Returns the actor's own error, or [`EngineError::ActorPanicked`].
    pub fn join(self) -> Result<(), EngineError> {
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => Err(EngineError::ActorPanicked { actor: self.name }),
        }
    }
}

/// Stops the game if the owning actor unwinds.
struct StopOnPanic<S> {
    shared: Arc<Shared<S>>,
    name: &'static str,
}

impl<S> Drop for StopOnPanic<S> {
    fn drop(&mut self) {
        if thread::panicking() {
            tracing::error!(actor = self.name, "actor panicked, stopping game");
            self.shared.stop();
        }
    }
}

/// Start `body` on a thread named `centipede-<name>`.
pub(crate) fn spawn_actor<S, F>(
    name: &'static str,
    shared: &Arc<Shared<S>>,
    body: F,
) -> Result<ActorHandle, EngineError>
where
    S: Send + 'static,
    F: FnOnce() -> Result<(), EngineError> + Send + 'static,
{
    let guard = StopOnPanic {
        shared: Arc::clone(shared),
        name,
    };
    let handle = thread::Builder::new()
        .name(format!("centipede-{name}"))
        .spawn(move || {
            let _guard = guard;
            tracing::debug!(actor = name, "actor started");
            let result = body();
            tracing::debug!(actor = name, ok = result.is_ok(), "actor stopped");
            result
        })
        .map_err(|source| EngineError::Spawn { actor: name, source })?;
    Ok(ActorHandle { name, handle })
}
