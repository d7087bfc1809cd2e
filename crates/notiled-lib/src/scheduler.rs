//! Single-shot timers — `Scheduler` trait + deadline queue + manual mock.
//!
//! Timers never call back on their own. Whoever owns the scheduler asks it
//! which handles have expired and feeds them to the sequencer's `tick`, so
//! every state transition runs in one serialized context.

use std::time::{Duration, Instant};

/// Identifies one armed timer. Handles are never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Arms and cancels single-shot timers.
pub trait Scheduler {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle;
    /// Cancel a timer. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Deadline queue on the monotonic clock, drained by [`crate::EventLoop`].
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    timers: Vec<(Instant, TimerHandle)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|&(at, _)| at).min()
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn expired(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut due: Vec<(Instant, TimerHandle)> = Vec::new();
        self.timers.retain(|&(at, h)| {
            if at <= now {
                due.push((at, h));
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, h)| h).collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl Scheduler for TimerQueue {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.timers.push((Instant::now() + delay, handle));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|&(_, h)| h != handle);
    }
}

// ── Manual scheduler for testing ──

/// Scheduler that never fires on its own; tests pop timers explicitly.
#[doc(hidden)]
pub mod mock {
    use super::*;

    #[derive(Debug, Default)]
    pub struct ManualScheduler {
        next_id: u64,
        /// Timers armed and not yet fired or canceled.
        pub pending: Vec<(TimerHandle, Duration)>,
        /// Every delay ever armed, in order.
        pub armed: Vec<Duration>,
        /// Every handle canceled while still pending.
        pub canceled: Vec<TimerHandle>,
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pop the oldest pending timer, as if it had expired.
        pub fn fire(&mut self) -> Option<TimerHandle> {
            if self.pending.is_empty() {
                return None;
            }
            Some(self.pending.remove(0).0)
        }

        /// Delay of the most recently armed timer.
        pub fn last_delay(&self) -> Option<Duration> {
            self.armed.last().copied()
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
            self.next_id += 1;
            let handle = TimerHandle(self.next_id);
            self.pending.push((handle, delay));
            self.armed.push(delay);
            handle
        }

        fn cancel(&mut self, handle: TimerHandle) {
            if let Some(pos) = self.pending.iter().position(|&(h, _)| h == handle) {
                self.pending.remove(pos);
                self.canceled.push(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::ManualScheduler;
    use super::*;

    #[test]
    fn handles_are_unique() {
        let mut q = TimerQueue::new();
        let a = q.schedule_after(Duration::ZERO);
        let b = q.schedule_after(Duration::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn expired_returns_due_timers_in_deadline_order() {
        let mut q = TimerQueue::new();
        let late = q.schedule_after(Duration::from_millis(20));
        let early = q.schedule_after(Duration::from_millis(10));
        let never = q.schedule_after(Duration::from_secs(3600));

        let due = q.expired(Instant::now() + Duration::from_millis(50));
        assert_eq!(due, vec![early, late]);
        assert_eq!(q.len(), 1);
        q.cancel(never);
        assert!(q.is_empty());
    }

    #[test]
    fn canceled_timer_never_expires() {
        let mut q = TimerQueue::new();
        let h = q.schedule_after(Duration::ZERO);
        q.cancel(h);
        assert!(q.expired(Instant::now() + Duration::from_secs(1)).is_empty());
        assert!(q.next_deadline().is_none());
    }

    #[test]
    fn next_deadline_is_earliest() {
        let mut q = TimerQueue::new();
        q.schedule_after(Duration::from_secs(10));
        q.schedule_after(Duration::from_secs(1));
        let d = q.next_deadline().unwrap();
        assert!(d <= Instant::now() + Duration::from_secs(1));
    }

    #[test]
    fn manual_scheduler_fires_in_arm_order() {
        let mut s = ManualScheduler::new();
        let a = s.schedule_after(Duration::from_millis(5));
        let b = s.schedule_after(Duration::from_millis(1));
        assert_eq!(s.fire(), Some(a));
        assert_eq!(s.fire(), Some(b));
        assert_eq!(s.fire(), None);
    }

    #[test]
    fn manual_scheduler_tracks_cancellations() {
        let mut s = ManualScheduler::new();
        let a = s.schedule_after(Duration::from_millis(5));
        s.cancel(a);
        s.cancel(a);
        assert_eq!(s.canceled, vec![a]);
        assert!(s.pending.is_empty());
    }
}
