//! Shared game state and the locking discipline around it.
//!
//! All state touched by more than one actor lives in [`Shared`], split
//! across five locks:
//!
//! ```text
//!   outer (at most one per thread)          inner
//! ┌─────────┬─────────────┬───────┬─────────┐   ┌────────┐
//! │ player  │ caterpillar │ stats │ running │──▶│ screen │
//! └─────────┴─────────────┴───────┴─────────┘   └────────┘
//! ```
//!
//! Fields are private; the only way in is a `with_*` accessor. Outer
//! accessors hand their closure a [`Screen`] gate, which is the only way
//! to paint while an outer lock is held, so the outer-then-screen order
//! falls out of the API. [`lock_order`] checks the rest at runtime.

pub mod lock_order;
mod registry;
mod run_flag;

pub use registry::{ProjectileRegistry, ProjectileTicket};
pub use run_flag::RunFlag;

use crate::actor::EnemySegment;
use crate::layout::Board;
use crate::sprites::ANIM_FRAMES;
use lock_order::LockClass;
use parking_lot::Mutex;

/// Player position and animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    row: i32,
    col: i32,
    anim_frame: usize,
}

impl PlayerState {
    /// A player at `(row, col)`, clamped into the player zone.
    pub fn new(row: i32, col: i32) -> Self {
        let (row, col) = Board::PLAYER_BOUNDS.clamp(row, col);
        Self {
            row,
            col,
            anim_frame: 0,
        }
    }

    /// Current row of the sprite's top cell.
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Current column.
    pub const fn col(&self) -> i32 {
        self.col
    }

    /// Index into the animation cycle.
    pub const fn anim_frame(&self) -> usize {
        self.anim_frame
    }

    /// Move by `(d_row, d_col)`, clamped to the player zone.
    pub fn shift(&mut self, d_row: i32, d_col: i32) {
        let (row, col) = Board::PLAYER_BOUNDS.clamp(self.row + d_row, self.col + d_col);
        self.row = row;
        self.col = col;
    }

    /// Step to the next animation frame.
    pub fn advance_frame(&mut self) {
        self.anim_frame = (self.anim_frame + 1) % ANIM_FRAMES;
    }
}

/// Score and lives as shown on the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsState {
    score: u32,
    lives: u32,
}

impl StatsState {
    /// Counters with the given starting values.
    pub const fn new(score: u32, lives: u32) -> Self {
        Self { score, lives }
    }

    /// Current score.
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Remaining lives.
    pub const fn lives(&self) -> u32 {
        self.lives
    }
}

/// The live enemy segments, keyed by id.
#[derive(Debug, Default)]
pub struct EnemyChain {
    segments: Vec<EnemySegment>,
}

impl EnemyChain {
    /// Add a segment.
    pub fn insert(&mut self, segment: EnemySegment) {
        self.segments.push(segment);
    }

    /// Look up a segment by id.
    pub fn get_mut(&mut self, id: usize) -> Option<&mut EnemySegment> {
        self.segments.iter_mut().find(|segment| segment.id() == id)
    }

    /// Remove a segment by id.
    pub fn remove(&mut self, id: usize) -> Option<EnemySegment> {
        let index = self.segments.iter().position(|segment| segment.id() == id)?;
        Some(self.segments.remove(index))
    }

    /// Number of live segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no segment is alive.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the live segments.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySegment> {
        self.segments.iter()
    }
}

/// Gate to the screen lock, handed out while an outer lock is held.
pub struct Screen<'a, S> {
    surface: &'a Mutex<S>,
}

impl<S> Screen<'_, S> {
    /// Take the screen lock and paint.
    ///
    /// Everything done inside `f` is one indivisible update as far as
    /// other actors are concerned.
    pub fn paint<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let _order = lock_order::acquire(LockClass::Screen);
        let mut surface = self.surface.lock();
        f(&mut surface)
    }
}

/// Everything the actors share.
pub struct Shared<S> {
    running: RunFlag,
    player: Mutex<PlayerState>,
    caterpillar: Mutex<EnemyChain>,
    stats: Mutex<StatsState>,
    screen: Mutex<S>,
    projectiles: ProjectileRegistry,
}

impl<S> Shared<S> {
    /// Wrap an initialised surface and the starting state.
    pub fn new(surface: S, player: PlayerState, stats: StatsState) -> Self {
        Self {
            running: RunFlag::new(),
            player: Mutex::new(player),
            caterpillar: Mutex::new(EnemyChain::default()),
            stats: Mutex::new(stats),
            screen: Mutex::new(surface),
            projectiles: ProjectileRegistry::new(),
        }
    }

    const fn screen(&self) -> Screen<'_, S> {
        Screen {
            surface: &self.screen,
        }
    }

    /// Whether the game is still running.
    pub fn is_running(&self) -> bool {
        self.running.is_running()
    }

    /// Stop the game. Returns `true` if this call performed the transition.
    pub fn stop(&self) -> bool {
        self.running.stop()
    }

    /// Stop the game and run `cleanup` while the running lock is still held.
    ///
    /// Actors checking the flag block until `cleanup` returns. Returns
    /// `None` without calling `cleanup` if the game had already stopped.
    pub fn stop_with<R>(&self, cleanup: impl FnOnce(&Screen<'_, S>) -> R) -> Option<R> {
        self.running.hold(|running| {
            if !*running {
                return None;
            }
            *running = false;
            Some(cleanup(&self.screen()))
        })
    }

    /// Run `f` with the player lock held.
    pub fn with_player<R>(&self, f: impl FnOnce(&mut PlayerState, &Screen<'_, S>) -> R) -> R {
        let _order = lock_order::acquire(LockClass::Player);
        let mut player = self.player.lock();
        f(&mut player, &self.screen())
    }

    /// Run `f` with the caterpillar lock held.
    pub fn with_caterpillar<R>(&self, f: impl FnOnce(&mut EnemyChain, &Screen<'_, S>) -> R) -> R {
        let _order = lock_order::acquire(LockClass::Caterpillar);
        let mut chain = self.caterpillar.lock();
        f(&mut chain, &self.screen())
    }

    /// Run `f` with the stats lock held.
    pub fn with_stats<R>(&self, f: impl FnOnce(&mut StatsState, &Screen<'_, S>) -> R) -> R {
        let _order = lock_order::acquire(LockClass::Stats);
        let mut stats = self.stats.lock();
        f(&mut stats, &self.screen())
    }

    /// Run `f` with only the screen lock held.
    pub fn with_screen<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        self.screen().paint(f)
    }

    /// Copy of the player state, taken under the player lock.
    pub fn player_snapshot(&self) -> PlayerState {
        self.with_player(|player, _| *player)
    }

    /// Copy of the counters, taken under the stats lock.
    pub fn stats_snapshot(&self) -> StatsState {
        self.with_stats(|stats, _| *stats)
    }

    /// Live projectile bookkeeping.
    pub const fn projectiles(&self) -> &ProjectileRegistry {
        &self.projectiles
    }
}
