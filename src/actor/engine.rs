//! Engine: initialises the board, runs every actor, tears down.
//!
//! The Engine is the entry point for the game. It owns the shared state,
//! spawns the long-lived actors, joins them once the run flag drops, and
//! waits a bounded time for in-flight projectiles.

use super::{
    spawn_actor, ActorHandle, EnemySpawner, HudActor, InputActor, KeySource, PlayerActor,
};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::layout::{BOARD_TEMPLATE, GAME_COLS, GAME_ROWS};
use crate::state::{PlayerState, Shared, StatsState};
use crate::surface::RenderSurface;
use std::sync::Arc;

/// What happened to the projectiles over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Projectiles launched during the game.
    pub projectiles_spawned: u64,
    /// Projectiles still live when the drain timed out.
    pub projectiles_outstanding: usize,
}

/// The game engine.
pub struct Engine<S, K> {
    shared: Arc<Shared<S>>,
    keys: K,
    config: EngineConfig,
}

impl<S, K> Engine<S, K>
where
    S: RenderSurface + 'static,
    K: KeySource + 'static,
{
    /// Initialise `surface` and build the shared state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Surface`] if the surface cannot be set up;
    /// no actor has been started at that point.
    pub fn new(mut surface: S, keys: K, config: EngineConfig) -> Result<Self, EngineError> {
        surface.init(GAME_ROWS, GAME_COLS, &BOARD_TEMPLATE)?;
        let (row, col) = config.player_start;
        let shared = Shared::new(surface, PlayerState::new(row, col), StatsState::new(0, config.lives));
        Ok(Self {
            shared: Arc::new(shared),
            keys,
            config,
        })
    }

    /// Handle on the shared state, for observing a running game.
    pub fn shared(&self) -> Arc<Shared<S>> {
        Arc::clone(&self.shared)
    }

    /// The configuration in effect.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the game to completion.
    ///
    /// Returns once every long-lived actor has been joined and the
    /// projectile drain has finished or timed out. The surface is closed
    /// on every path.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Spawn`] if an actor could not be started (the
    /// game is stopped and the actors already running are joined first),
    /// or the first actor failure seen while joining.
    pub fn run(self) -> Result<RunReport, EngineError> {
        let Self { shared, keys, config } = self;
        tracing::info!(tick = ?config.tick, segments = config.enemy_segments, "game starting");

        let mut actors = Vec::with_capacity(4);
        let started = start_actors(&shared, keys, &config, &mut actors);
        let first_failure = join_actors(&shared, actors, started.err());

        let projectiles = shared.projectiles();
        if !projectiles.wait_idle(config.drain_timeout) {
            tracing::warn!(live = projectiles.live(), "projectiles still live after drain timeout");
        }
        let report = RunReport {
            projectiles_spawned: projectiles.spawned_total(),
            projectiles_outstanding: projectiles.live(),
        };

        shared.with_screen(|surface| surface.close());
        tracing::info!(spawned = report.projectiles_spawned, "game over");

        match first_failure {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }
}

/// Join every started actor and return the first failure.
///
/// A start failure stops the game before joining, so the actors already
/// running wind down, and takes precedence over anything they report.
fn join_actors<S>(
    shared: &Shared<S>,
    actors: Vec<ActorHandle>,
    start_failure: Option<EngineError>,
) -> Option<EngineError> {
    if let Some(err) = &start_failure {
        tracing::error!(error = %err, "actor start failed, stopping game");
        shared.stop();
    }
    let mut first_failure = start_failure;
    for actor in actors {
        let name = actor.name();
        if let Err(err) = actor.join() {
            tracing::error!(actor = name, error = %err, "actor failed");
            first_failure.get_or_insert(err);
        }
    }
    first_failure
}

fn start_actors<S, K>(
    shared: &Arc<Shared<S>>,
    keys: K,
    config: &EngineConfig,
    actors: &mut Vec<ActorHandle>,
) -> Result<(), EngineError>
where
    S: RenderSurface + 'static,
    K: KeySource + 'static,
{
    let tick = config.tick;

    let player = PlayerActor::new(Arc::clone(shared), tick);
    actors.push(spawn_actor("player", shared, move || player.run())?);

    let input = InputActor::new(Arc::clone(shared), keys, tick);
    actors.push(spawn_actor("input", shared, move || input.run())?);

    let hud = HudActor::new(Arc::clone(shared), tick);
    actors.push(spawn_actor("hud", shared, move || hud.run())?);

    let spawner = EnemySpawner::new(Arc::clone(shared), tick, config.enemy_segments, config.respawn);
    actors.push(spawn_actor("spawner", shared, move || spawner.run())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{KeyCode, ScriptedKeys};
    use crate::error::KeyError;
    use crate::surface::HeadlessSurface;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    struct CrashingKeys;

    impl KeySource for CrashingKeys {
        fn next_key(&mut self, _timeout: Duration) -> Result<Option<KeyCode>, KeyError> {
            panic!("keyboard driver crashed");
        }
    }

    fn config() -> EngineConfig {
        EngineConfig {
            tick: Duration::from_millis(2),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_failed_init_starts_nothing() {
        let (_tx, keys) = ScriptedKeys::channel();
        let result = Engine::new(HeadlessSurface::failing(), keys, config());
        assert!(matches!(result, Err(EngineError::Surface(_))));
    }

    #[test]
    fn test_quit_joins_and_closes() {
        let (tx, keys) = ScriptedKeys::channel();
        let engine = Engine::new(HeadlessSurface::new(), keys, config()).unwrap();
        let shared = engine.shared();
        tx.send(KeyCode::Char('q')).unwrap();
        let report = engine.run().unwrap();
        assert_eq!(report.projectiles_spawned, 0);
        assert!(!shared.is_running());
        shared.with_screen(|surface| {
            assert!(surface.is_closed());
            assert_eq!(surface.banners().len(), 1);
        });
    }

    #[test]
    fn test_start_failure_stops_and_joins_running_actors() {
        let (_tx, keys) = ScriptedKeys::channel();
        let engine = Engine::new(HeadlessSurface::new(), keys, config()).unwrap();
        let shared = engine.shared();
        let exited = Arc::new(AtomicBool::new(false));
        let running = {
            let (shared, exited) = (Arc::clone(&shared), Arc::clone(&exited));
            spawn_actor("player", &engine.shared, move || {
                while shared.is_running() {
                    std::thread::sleep(Duration::from_millis(1));
                }
                exited.store(true, Ordering::SeqCst);
                Ok(())
            })
            .unwrap()
        };
        let refused = EngineError::Spawn {
            actor: "hud",
            source: std::io::Error::from_raw_os_error(11),
        };

        let failure = join_actors(&shared, vec![running], Some(refused));

        assert!(matches!(failure, Some(EngineError::Spawn { actor: "hud", .. })));
        assert!(!shared.is_running());
        assert!(exited.load(Ordering::SeqCst));
    }

    #[test]
    fn test_actor_panic_stops_game_and_is_reported() {
        let engine = Engine::new(HeadlessSurface::new(), CrashingKeys, config()).unwrap();
        let shared = engine.shared();
        let result = engine.run();
        assert!(matches!(result, Err(EngineError::ActorPanicked { actor: "input" })));
        assert!(!shared.is_running());
        shared.with_screen(|surface| {
            assert!(surface.is_closed());
            assert!(surface.banners().is_empty());
        });
    }
}
