//! Pacer: fixed-period sleeping for the periodic actors.

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps each actor to its next tick deadline.
///
/// Deadlines advance by whole periods so time spent waiting on locks does
/// not stretch the period. A pacer that falls behind restarts from now
/// instead of firing a burst of catch-up ticks.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    next_tick: Instant,
    ticks: u64,
}

impl Pacer {
    /// A pacer whose first deadline is one `interval` from now.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: Instant::now() + interval,
            ticks: 0,
        }
    }

    /// Ticks completed so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Sleep until the next deadline.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next_tick {
            thread::sleep(self.next_tick - now);
            self.next_tick += self.interval;
        } else {
            self.next_tick = now + self.interval;
        }
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_sleeps_one_period() {
        let mut pacer = Pacer::new(Duration::from_millis(10));
        let start = Instant::now();
        pacer.wait();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(pacer.ticks(), 2);
    }

    #[test]
    fn test_late_pacer_does_not_burst() {
        let mut pacer = Pacer::new(Duration::from_millis(5));
        thread::sleep(Duration::from_millis(30));
        pacer.wait();
        let start = Instant::now();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(4));
    }
}
