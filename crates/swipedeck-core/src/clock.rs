#![forbid(unsafe_code)]

//! Time sources: real wall-clock time or a manually advanceable lab clock.
//!
//! Every timestamp the deck consumes flows through a [`Clock`] so that the
//! whole engine — gesture velocity estimation, debounce timers, the
//! auto-advance interval — can run deterministically under test.
//!
//! # Invariants
//!
//! 1. `Clock::now()` is monotonically non-decreasing for a given clock.
//! 2. All `Clock` handles sharing one [`LabClock`] observe the same time.
//! 3. Advancing a lab clock never moves time backwards.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use web_time::{Duration, Instant};

/// A manually-advanceable clock for deterministic tests.
///
/// All [`Clock`] handles built from the same `LabClock` see the same time.
#[derive(Debug, Clone)]
pub struct LabClock {
    epoch: Instant,
    offset_us: Arc<AtomicU64>,
}

impl LabClock {
    /// Create a new lab clock starting at `Instant::now()`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            offset_us: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Advance the lab clock by `delta`.
    pub fn advance(&self, delta: Duration) {
        let us = delta.as_micros().min(u64::MAX as u128) as u64;
        self.offset_us.fetch_add(us, Ordering::Release);
    }

    /// Current lab time.
    #[must_use]
    pub fn now(&self) -> Instant {
        let offset = Duration::from_micros(self.offset_us.load(Ordering::Acquire));
        self.epoch + offset
    }
}

impl Default for LabClock {
    fn default() -> Self {
        Self::new()
    }
}

/// A time source handle: real wall-clock time or a shared [`LabClock`].
///
/// Cheaply cloneable.
#[derive(Debug, Clone)]
pub enum Clock {
    /// Real wall-clock time.
    Real,
    /// Deterministic lab clock for testing.
    Lab(LabClock),
}

impl Clock {
    /// A real-time clock.
    #[must_use]
    pub const fn real() -> Self {
        Self::Real
    }

    /// A clock driven by the given [`LabClock`].
    #[must_use]
    pub fn lab(clock: &LabClock) -> Self {
        Self::Lab(clock.clone())
    }

    /// Current time according to this clock.
    #[must_use]
    pub fn now(&self) -> Instant {
        match self {
            Self::Real => Instant::now(),
            Self::Lab(c) => c.now(),
        }
    }

    /// Whether this clock is lab-driven.
    #[inline]
    #[must_use]
    pub const fn is_lab(&self) -> bool {
        matches!(self, Self::Lab(_))
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::Real
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_clock_moves_forward() {
        let clock = Clock::real();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(!clock.is_lab());
    }

    #[test]
    fn lab_clock_is_frozen_until_advanced() {
        let lab = LabClock::new();
        let clock = Clock::lab(&lab);
        let a = clock.now();
        let b = clock.now();
        assert_eq!(a, b);
        assert!(clock.is_lab());
    }

    #[test]
    fn lab_clock_advance_accumulates() {
        let lab = LabClock::new();
        let t0 = lab.now();
        lab.advance(Duration::from_millis(100));
        lab.advance(Duration::from_millis(200));
        assert_eq!(lab.now().duration_since(t0), Duration::from_millis(300));
    }

    #[test]
    fn handles_share_lab_time() {
        let lab = LabClock::new();
        let a = Clock::lab(&lab);
        let b = Clock::lab(&lab);
        lab.advance(Duration::from_millis(50));
        assert_eq!(a.now(), b.now());
    }

    #[test]
    fn default_is_real() {
        assert!(!Clock::default().is_lab());
    }
}
