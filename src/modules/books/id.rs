use std::time::{SystemTime, UNIX_EPOCH};

use super::models::BookId;

/// Source of wall-clock milliseconds, swappable in tests.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Issues numeric ids from the clock, strictly increasing within a session.
///
/// When the clock has not moved past the last issued id (two creations in the
/// same millisecond, or the clock stepped backwards) the next id is `last + 1`.
/// Once `u64::MAX` has been seen, ids come from the lowest value not in use.
#[derive(Debug)]
pub struct IdGenerator<C = SystemClock> {
    clock: C,
    last: u64,
}

impl IdGenerator<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for IdGenerator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> IdGenerator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock, last: 0 }
    }

    /// Never issue an id at or below `floor`.
    pub fn observe(&mut self, floor: u64) {
        self.last = self.last.max(floor);
    }

    /// Issue the next id. `in_use` is consulted only after the counter is
    /// exhausted, to find a free value below it.
    pub fn next_id(&mut self, in_use: impl Fn(u64) -> bool) -> BookId {
        let now = self.clock.now_millis();
        if now > self.last {
            self.last = now;
            return BookId::Numeric(now);
        }

        match self.last.checked_add(1) {
            Some(id) => {
                self.last = id;
                BookId::Numeric(id)
            }
            None => {
                let free = (0..u64::MAX).find(|n| !in_use(*n)).unwrap_or(u64::MAX);
                BookId::Numeric(free)
            }
        }
    }
}
