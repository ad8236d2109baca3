#![forbid(unsafe_code)]

//! Pointer/touch drag tracking with release-velocity estimation.
//!
//! A [`PointerTracker`] ingests timestamped pointer positions between a
//! `begin` and a `finish` and reports the displacement from the drag
//! origin plus an estimated release velocity in px/ms. Velocity is the
//! secant slope over a short trailing window of samples, so a drag that
//! stalls before release correctly reports a near-zero speed no matter how
//! fast it moved earlier.
//!
//! # Invariants
//!
//! 1. Displacement is always `latest - origin`, independent of the sample
//!    window.
//! 2. Velocity is computed only from samples inside the trailing window.
//! 3. `finish` without a matching `begin` yields `None`.

use std::collections::VecDeque;
use web_time::{Duration, Instant};

use crate::geometry::Vec2;

/// Trailing window over which release velocity is estimated.
pub const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Upper bound on retained samples, so a long drag stays O(1) memory.
const MAX_SAMPLES: usize = 32;

/// Result of a finished drag: total displacement and release velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Displacement from the drag origin, in px.
    pub displacement: Vec2,
    /// Estimated release velocity, in px/ms.
    pub velocity: Vec2,
}

impl DragRelease {
    /// Magnitude of the release velocity, in px/ms.
    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Tracks one pointer drag at a time.
#[derive(Debug)]
pub struct PointerTracker {
    window: Duration,
    origin: Vec2,
    samples: VecDeque<(Vec2, Instant)>,
    active: bool,
}

impl PointerTracker {
    /// Create a tracker with the default velocity window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(VELOCITY_WINDOW)
    }

    /// Create a tracker with a custom velocity window.
    #[must_use]
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            origin: Vec2::ZERO,
            samples: VecDeque::new(),
            active: false,
        }
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Displacement of the latest sample from the drag origin.
    #[must_use]
    pub fn displacement(&self) -> Vec2 {
        match self.samples.back() {
            Some(&(pos, _)) => pos - self.origin,
            None => Vec2::ZERO,
        }
    }

    /// Start a drag at `position`.
    ///
    /// Any drag already in progress is discarded.
    pub fn begin(&mut self, position: Vec2, now: Instant) {
        self.origin = position;
        self.samples.clear();
        self.samples.push_back((position, now));
        self.active = true;
    }

    /// Record a pointer move. Returns the new displacement from the origin.
    ///
    /// Ignored (returning the current displacement) when no drag is active.
    pub fn update(&mut self, position: Vec2, now: Instant) -> Vec2 {
        if !self.active {
            return self.displacement();
        }
        self.samples.push_back((position, now));
        self.prune(now);
        position - self.origin
    }

    /// Abandon the drag in progress without producing a release.
    pub fn cancel(&mut self) {
        self.active = false;
        self.samples.clear();
    }

    /// End the drag at `position`, yielding displacement and velocity.
    pub fn finish(&mut self, position: Vec2, now: Instant) -> Option<DragRelease> {
        if !self.active {
            return None;
        }
        self.samples.push_back((position, now));
        self.prune(now);

        let displacement = position - self.origin;
        let velocity = self.window_velocity(position, now);
        self.active = false;
        self.samples.clear();
        Some(DragRelease {
            displacement,
            velocity,
        })
    }

    /// Secant velocity over the trailing window, in px/ms.
    fn window_velocity(&self, latest: Vec2, now: Instant) -> Vec2 {
        let Some(&(oldest_pos, oldest_at)) = self.samples.front() else {
            return Vec2::ZERO;
        };
        let dt_ms = now.duration_since(oldest_at).as_secs_f32() * 1000.0;
        if dt_ms <= f32::EPSILON {
            return Vec2::ZERO;
        }
        (latest - oldest_pos).scale(1.0 / dt_ms)
    }

    fn prune(&mut self, now: Instant) {
        while let Some(&(_, at)) = self.samples.front() {
            let stale = now.duration_since(at) > self.window;
            if stale && self.samples.len() > 1 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
        while self.samples.len() > MAX_SAMPLES {
            self.samples.pop_front();
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}
