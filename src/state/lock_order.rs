//! Per-thread lock-order tracking.
//!
//! The game state is split across five locks. Four of them are *outer*
//! locks (player, caterpillar, stats, running) and one is the *inner*
//! screen lock. A thread may hold at most one outer lock, and may take the
//! screen lock while holding it, but never the other way round. Every
//! accessor in [`Shared`](super::Shared) registers here before touching
//! its mutex, so a violation panics on the offending thread instead of
//! deadlocking two of them.

use std::cell::Cell;

/// The five lock classes of the shared game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockClass {
    /// Player position and animation frame.
    Player,
    /// Enemy chain state.
    Caterpillar,
    /// Score and lives.
    Stats,
    /// The run flag.
    Running,
    /// The render surface.
    Screen,
}

impl LockClass {
    /// Whether this lock must be taken before the screen lock.
    pub const fn is_outer(self) -> bool {
        !matches!(self, Self::Screen)
    }

    /// Lower-case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Caterpillar => "caterpillar",
            Self::Stats => "stats",
            Self::Running => "running",
            Self::Screen => "screen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Held {
    outer: Option<LockClass>,
    screen: bool,
}

impl Held {
    const NONE: Self = Self {
        outer: None,
        screen: false,
    };
}

thread_local! {
    static HELD: Cell<Held> = const { Cell::new(Held::NONE) };
}

/// Proof that the current thread registered a lock acquisition.
///
/// Dropping it restores the previous state, including during unwinding.
#[must_use = "the order token must live as long as the lock guard"]
pub(crate) struct OrderToken {
    previous: Held,
}

/// Register intent to take `class` on this thread.
///
/// # Panics
///
/// Panics if taking `class` now would break the outer-then-screen order.
pub(crate) fn acquire(class: LockClass) -> OrderToken {
    HELD.with(|held| {
        let current = held.get();
        let next = if class.is_outer() {
            assert!(
                !current.screen,
                "lock order violation: {} lock requested while holding the screen lock",
                class.name()
            );
            if let Some(outer) = current.outer {
                panic!(
                    "lock order violation: {} lock requested while holding the {} lock",
                    class.name(),
                    outer.name()
                );
            }
            Held {
                outer: Some(class),
                screen: false,
            }
        } else {
            assert!(
                !current.screen,
                "lock order violation: screen lock requested re-entrantly"
            );
            Held {
                outer: current.outer,
                screen: true,
            }
        };
        held.set(next);
        OrderToken { previous: current }
    })
}

impl Drop for OrderToken {
    fn drop(&mut self) {
        HELD.with(|held| held.set(self.previous));
    }
}

/// The outer lock this thread currently holds, if any.
pub fn held_outer() -> Option<LockClass> {
    HELD.with(|held| held.get().outer)
}

/// Whether this thread currently holds the screen lock.
pub fn holds_screen() -> bool {
    HELD.with(|held| held.get().screen)
}
