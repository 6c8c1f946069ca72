//! Projectile registry: counts live projectile actors without owning them.

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Inner {
    live: Mutex<usize>,
    idle: Condvar,
    spawned: AtomicU64,
}

/// Live-projectile counter shared by the input actor and the engine.
///
/// Projectiles are fire-and-forget; each one carries a
/// [`ProjectileTicket`] for its lifetime and the registry only sees the
/// count. Lets the engine wait for stragglers after shutdown.
#[derive(Debug, Clone, Default)]
pub struct ProjectileRegistry {
    inner: Arc<Inner>,
}

impl ProjectileRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a projectile about to be launched.
    pub fn enter(&self) -> ProjectileTicket {
        *self.inner.live.lock() += 1;
        let id = self.inner.spawned.fetch_add(1, Ordering::Relaxed);
        ProjectileTicket {
            inner: Arc::clone(&self.inner),
            id,
        }
    }

    /// Number of projectiles that have not yet finished.
    pub fn live(&self) -> usize {
        *self.inner.live.lock()
    }

    /// Total number of projectiles ever registered.
    pub fn spawned_total(&self) -> u64 {
        self.inner.spawned.load(Ordering::Relaxed)
    }

    /// Block until no projectile is live or `timeout` elapses.
    ///
    /// Returns `true` if the registry drained.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut live = self.inner.live.lock();
        while *live > 0 {
            if self.inner.idle.wait_until(&mut live, deadline).timed_out() {
                return *live == 0;
            }
        }
        true
    }
}

/// Held by one projectile actor for as long as it runs.
#[derive(Debug)]
pub struct ProjectileTicket {
    inner: Arc<Inner>,
    id: u64,
}

impl ProjectileTicket {
    /// Sequence number of this projectile.
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for ProjectileTicket {
    fn drop(&mut self) {
        let mut live = self.inner.live.lock();
        *live = live.saturating_sub(1);
        if *live == 0 {
            self.inner.idle.notify_all();
        }
    }
}
