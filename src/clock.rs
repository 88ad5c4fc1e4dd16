//! Monotonic time sources for the scheduler.

use std::ops::Add;
use time::{self, Duration};

/// A point in monotonic time, in milliseconds since the clock's origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(ms: i64) -> Timestamp {
        Timestamp(ms)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`. Negative if `earlier` is later.
    pub fn since(&self, earlier: Timestamp) -> Duration {
        Duration::milliseconds(self.0 - earlier.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0 + rhs.num_milliseconds())
    }
}

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by the high resolution system timer.
pub struct SystemClock {
    origin_ns: u64,
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock { origin_ns: time::precise_time_ns() }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let elapsed_ns = time::precise_time_ns().saturating_sub(self.origin_ns);
        Timestamp::from_millis((elapsed_ns / 1_000_000) as i64)
    }
}

#[cfg(test)]
pub use self::manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::{Clock, Timestamp};
    use std::cell::Cell;
    use time::Duration;

    /// A clock that only moves when told to.
    pub struct ManualClock {
        now: Cell<Timestamp>,
    }

    impl ManualClock {
        pub fn new() -> ManualClock {
            ManualClock { now: Cell::new(Timestamp::default()) }
        }

        pub fn advance(&self, by: Duration) -> Timestamp {
            let next = self.now.get() + by;
            self.now.set(next);
            next
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Timestamp {
            self.now.get()
        }
    }
}
