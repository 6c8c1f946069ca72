//! Error types for the engine and its keyboard collaborator.

use std::io;

/// Failures surfaced by [`Engine`](crate::Engine) and the actors it runs.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The render surface failed to initialise or finish.
    #[error("render surface error: {0}")]
    Surface(#[from] io::Error),

    /// The OS refused to start an actor thread.
    #[error("failed to spawn {actor} actor: {source}")]
    Spawn {
        /// Which actor could not be started.
        actor: &'static str,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A long-lived actor panicked.
    #[error("{actor} actor panicked")]
    ActorPanicked {
        /// Which actor.
        actor: &'static str,
    },
}

/// Failures reported by a [`KeySource`](crate::actor::KeySource).
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// The key feed is gone and will never deliver again.
    #[error("key source disconnected")]
    Disconnected,

    /// Reading the terminal failed.
    #[error("key read failed: {0}")]
    Io(#[from] io::Error),
}
