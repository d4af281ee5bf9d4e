// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Latest-call-wins debouncing on a host-passed clock.

/// A debounced slot holding at most one pending payload.
///
/// The engine owns no timers: the host passes its own monotonic
/// millisecond clock into [`schedule`](Debounce::schedule) and
/// [`poll`](Debounce::poll), the same way pointer timestamps flow through
/// interaction state machines. Scheduling replaces whatever was pending, so
/// only the latest call ever fires. Dropping the slot on component teardown
/// discards any pending payload; no explicit cancellation token exists.
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    delay_ms: u64,
    pending: Option<(u64, T)>,
}

impl<T> Debounce<T> {
    /// Creates an idle slot firing `delay_ms` after the latest schedule.
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Replaces any pending payload; the delay restarts from `now_ms`.
    pub fn schedule(&mut self, payload: T, now_ms: u64) {
        self.pending = Some((now_ms.saturating_add(self.delay_ms), payload));
    }

    /// Takes the payload once its delay has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.pending.as_ref().is_some_and(|(due, _)| *due <= now_ms) {
            self.pending.take().map(|(_, payload)| payload)
        } else {
            None
        }
    }

    /// Discards any pending payload.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns `true` while a payload is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::Debounce;

    #[test]
    fn fires_only_after_the_delay() {
        let mut slot = Debounce::new(100);
        slot.schedule("a", 1_000);
        assert!(slot.is_pending());
        assert_eq!(slot.poll(1_050), None);
        assert_eq!(slot.poll(1_100), Some("a"));
        assert!(!slot.is_pending());
        assert_eq!(slot.poll(2_000), None);
    }

    #[test]
    fn latest_schedule_wins() {
        let mut slot = Debounce::new(100);
        slot.schedule("first", 1_000);
        slot.schedule("second", 1_080);
        // The first payload's due time has passed, but it was replaced.
        assert_eq!(slot.poll(1_100), None);
        assert_eq!(slot.poll(1_180), Some("second"));
    }

    #[test]
    fn cancel_discards_the_payload() {
        let mut slot = Debounce::new(100);
        slot.schedule(7_u32, 0);
        slot.cancel();
        assert_eq!(slot.poll(1_000), None);
    }
}
