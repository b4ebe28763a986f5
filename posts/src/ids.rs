//! Client-side ids for created posts

use crate::types::PostId;
use postfeed_core::environment::Clock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Issues strictly increasing ids derived from the clock's milliseconds
///
/// Each id is `max(now_ms, last + 1)`, so two posts created in the same
/// millisecond (or under a clock that does not move) still get distinct ids.
pub struct TimestampIdGenerator {
    clock: Arc<dyn Clock>,
    last: AtomicI64,
}

impl TimestampIdGenerator {
    /// Create a generator reading time from `clock`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicI64::new(i64::MIN),
        }
    }

    /// Next id, never equal to or below any id issued before
    pub fn next_id(&self) -> PostId {
        let now = self.clock.now().timestamp_millis();
        let mut last = self.last.load(Ordering::Acquire);

        loop {
            let candidate = now.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return PostId::new(candidate),
                Err(actual) => last = actual,
            }
        }
    }

    /// Last id issued, if any
    #[must_use]
    pub fn last_issued(&self) -> Option<PostId> {
        let last = self.last.load(Ordering::Acquire);
        (last != i64::MIN).then(|| PostId::new(last))
    }
}

impl std::fmt::Debug for TimestampIdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimestampIdGenerator")
            .field("last", &self.last_issued())
            .finish_non_exhaustive()
    }
}
