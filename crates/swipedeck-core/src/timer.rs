#![forbid(unsafe_code)]

//! Deadline-based timer queue, drained cooperatively from the host tick.
//!
//! There are no threads here. Callers schedule one-shot or repeating
//! entries against absolute deadlines and call [`TimerQueue::poll`] with
//! the current time; `poll` returns the ids that came due. Dropping the
//! queue discards every pending entry, so no timer can outlive its owner.
//!
//! # Invariants
//!
//! 1. `poll` returns due entries ordered by (deadline, id).
//! 2. A one-shot entry fires at most once, then leaves the queue.
//! 3. A repeating entry fires at most once per `poll`; missed intervals
//!    coalesce rather than burst.
//! 4. A cancelled id never fires again; cancelling an unknown id is a
//!    no-op returning `false`.

use web_time::{Duration, Instant};

/// Opaque handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
enum Repeat {
    Once,
    Every(Duration),
}

#[derive(Debug)]
struct Entry {
    id: TimerId,
    deadline: Instant,
    repeat: Repeat,
}

/// Queue of pending timers, polled with an externally supplied "now".
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_id: u64,
}

impl TimerQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule a one-shot timer `delay` after `now`.
    pub fn schedule_once(&mut self, now: Instant, delay: Duration) -> TimerId {
        self.push(now + delay, Repeat::Once)
    }

    /// Schedule a repeating timer firing every `interval` after `now`.
    ///
    /// `interval` must be non-zero.
    pub fn schedule_repeating(&mut self, now: Instant, interval: Duration) -> TimerId {
        debug_assert!(!interval.is_zero(), "repeating timer needs a nonzero interval");
        self.push(now + interval, Repeat::Every(interval))
    }

    fn push(&mut self, deadline: Instant, repeat: Repeat) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline,
            repeat,
        });
        id
    }

    /// Cancel a pending timer. Returns `true` if it was still scheduled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() < before
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether `id` is still pending.
    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of pending timers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timers are pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect every timer due at `now`, ordered by (deadline, id).
    ///
    /// One-shot entries are removed; repeating entries are re-armed past
    /// `now` so a long stall fires them once, not once per missed interval.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerId> {
        let mut due: Vec<(Instant, TimerId)> = Vec::new();
        for entry in &mut self.entries {
            if entry.deadline > now {
                continue;
            }
            due.push((entry.deadline, entry.id));
            if let Repeat::Every(interval) = entry.repeat {
                while entry.deadline <= now {
                    entry.deadline += interval;
                }
            }
        }
        self.entries
            .retain(|e| !(matches!(e.repeat, Repeat::Once) && e.deadline <= now));
        due.sort_by_key(|&(deadline, TimerId(id))| (deadline, id));
        due.into_iter().map(|(_, id)| id).collect()
    }
}
