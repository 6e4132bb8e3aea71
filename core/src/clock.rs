//! Time source used for every expiry comparison.

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Supplies the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockClock;

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use chrono::{DateTime, Duration, Utc};
    use std::sync::Mutex;

    use super::Clock;

    /// Manually driven clock for deterministic tests
    pub struct MockClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl MockClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(now),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }

        pub fn set(&self, to: DateTime<Utc>) {
            *self.now.lock().unwrap() = to;
        }
    }

    impl Default for MockClock {
        fn default() -> Self {
            Self::new(Utc::now())
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }
}
