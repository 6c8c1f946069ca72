//! The run flag: the game's only cancellation signal.

use super::lock_order::{self, LockClass};
use parking_lot::Mutex;

/// One-way `running` flag guarded by the running lock.
///
/// Starts `true`; once cleared it is never set again. Actors poll it once
/// per tick, so every periodic actor notices a stop within one period.
#[derive(Debug)]
pub struct RunFlag {
    running: Mutex<bool>,
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl RunFlag {
    /// A flag in the running state.
    pub fn new() -> Self {
        Self {
            running: Mutex::new(true),
        }
    }

    /// Whether the game is still running.
    pub fn is_running(&self) -> bool {
        self.hold(|running| *running)
    }

    /// Clear the flag. Returns `true` if this call performed the transition.
    pub fn stop(&self) -> bool {
        self.hold(|running| std::mem::replace(running, false))
    }

    /// Run `f` with the running lock held.
    pub(crate) fn hold<R>(&self, f: impl FnOnce(&mut bool) -> R) -> R {
        let _order = lock_order::acquire(LockClass::Running);
        let mut running = self.running.lock();
        f(&mut running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_is_one_way() {
        let flag = RunFlag::new();
        assert!(flag.is_running());
        assert!(flag.stop());
        assert!(!flag.is_running());
        assert!(!flag.stop());
        assert!(!flag.is_running());
    }
}
