// Shared helpers for driving a headless game from integration tests.
#![allow(dead_code)]

use centipede::{Engine, EngineConfig, EngineError, HeadlessSurface, KeyCode, RunReport, ScriptedKeys, Shared};
use crossbeam_channel::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub type GameState = Arc<Shared<HeadlessSurface>>;

// A game running on its own thread, steered through a key channel.
pub struct Game {
    pub keys: Sender<KeyCode>,
    pub state: GameState,
    runner: JoinHandle<Result<RunReport, EngineError>>,
}

impl Game {
    pub fn start(config: EngineConfig) -> Self {
        let (keys, source) = ScriptedKeys::channel();
        let engine = Engine::new(HeadlessSurface::new(), source, config).expect("headless init");
        let state = engine.shared();
        let runner = thread::spawn(move || engine.run());
        Self { keys, state, runner }
    }

    pub fn press(&self, key: KeyCode) {
        self.keys.send(key).expect("input actor alive");
    }

    // Quit through the keyboard and wait for the engine to return.
    pub fn quit(self) -> (GameState, RunReport) {
        self.press(KeyCode::Char('q'));
        self.join()
    }

    // Drop the key feed, as if the keyboard went away, and wait for the engine.
    pub fn disconnect(self) -> (GameState, RunReport) {
        let Self { keys, state, runner } = self;
        drop(keys);
        let report = runner.join().expect("engine thread").expect("engine run");
        (state, report)
    }

    pub fn join(self) -> (GameState, RunReport) {
        let report = self.runner.join().expect("engine thread").expect("engine run");
        (self.state, report)
    }

    pub fn glyph_at(&self, row: i32, col: i32) -> Option<char> {
        self.state.with_screen(|surface| surface.glyph_at(row, col))
    }
}

// Config with a fast tick and no enemies unless a test asks for them.
pub fn quiet_config(tick_ms: u64) -> EngineConfig {
    EngineConfig {
        tick: Duration::from_millis(tick_ms),
        enemy_segments: 0,
        drain_timeout: Duration::from_secs(2),
        ..EngineConfig::default()
    }
}

// Poll `check` every millisecond until it holds or `timeout` passes.
pub fn eventually(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    check()
}
