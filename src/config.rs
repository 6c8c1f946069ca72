//! Engine configuration.

use crate::layout::Board;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Configuration for the Engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Period shared by every periodic actor, and the input wait bound.
    pub tick: Duration,
    /// Player start position as `(row, col)`.
    pub player_start: (i32, i32),
    /// Lives shown on the HUD.
    pub lives: u32,
    /// Segments per enemy wave.
    pub enemy_segments: usize,
    /// Start a new wave once the previous one has cleared.
    pub respawn: bool,
    /// Upper bound on waiting for live projectiles at shutdown.
    pub drain_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            player_start: Board::PLAYER_START,
            lives: 3,
            enemy_segments: 1,
            respawn: false,
            drain_timeout: Duration::from_millis(500),
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with `CENTIPEDE_*` environment variables.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(ms) = parse(&lookup, "CENTIPEDE_TICK_MS") {
            config.tick = Duration::from_millis(u64::max(ms, 1));
        }
        if let Some(lives) = parse(&lookup, "CENTIPEDE_LIVES") {
            config.lives = lives;
        }
        if let Some(segments) = parse(&lookup, "CENTIPEDE_ENEMY_SEGMENTS") {
            config.enemy_segments = segments;
        }
        if let Some(respawn) = parse(&lookup, "CENTIPEDE_RESPAWN") {
            config.respawn = respawn;
        }
        if let Some(ms) = parse(&lookup, "CENTIPEDE_DRAIN_MS") {
            config.drain_timeout = Duration::from_millis(ms);
        }
        config
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}
