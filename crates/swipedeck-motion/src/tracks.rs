#![forbid(unsafe_code)]

//! Labeled motion channels with shared lifecycle control.
//!
//! A [`Tracks`] holds a set of named [`Spring`] channels (for the deck:
//! `x`, `y`, `rotation`, `scale`, `opacity`) that tick together but are
//! addressed individually for retargeting and reads. This is the seam the
//! deck engine animates through — swap the integrator and nothing above
//! this module changes.
//!
//! # Invariants
//!
//! 1. Each channel has a unique label; inserting a duplicate replaces it.
//! 2. `tick` advances every unsettled channel by the same `dt`.
//! 3. `is_settled()` is true iff every channel is settled (vacuously true
//!    when empty).
//! 4. Unknown labels read as `None` and mutate as `false`.

use web_time::Duration;

use crate::motion::Motion;
use crate::spring::{Spring, SpringProfile};

/// A named spring channel.
#[derive(Debug, Clone)]
struct Track {
    label: &'static str,
    spring: Spring,
}

/// A set of labeled spring channels with shared ticking.
#[derive(Debug, Clone, Default)]
pub struct Tracks {
    tracks: Vec<Track>,
}

impl Tracks {
    /// Create an empty track set.
    #[must_use]
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Add a channel resting at `value` (builder).
    ///
    /// If `label` already exists, the previous channel is replaced.
    #[must_use]
    pub fn with(mut self, label: &'static str, value: f32) -> Self {
        self.insert(label, Spring::at(value));
        self
    }

    /// Insert a channel (mutating). Duplicate labels replace.
    pub fn insert(&mut self, label: &'static str, spring: Spring) {
        if let Some(existing) = self.tracks.iter_mut().find(|t| t.label == label) {
            existing.spring = spring;
        } else {
            self.tracks.push(Track { label, spring });
        }
    }

    /// Number of channels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether there are no channels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Current value of a channel.
    #[must_use]
    pub fn value(&self, label: &str) -> Option<f32> {
        self.tracks
            .iter()
            .find(|t| t.label == label)
            .map(|t| t.spring.value())
    }

    /// Borrow a channel's spring.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Spring> {
        self.tracks
            .iter()
            .find(|t| t.label == label)
            .map(|t| &t.spring)
    }

    /// Mutably borrow a channel's spring.
    pub fn get_mut(&mut self, label: &str) -> Option<&mut Spring> {
        self.tracks
            .iter_mut()
            .find(|t| t.label == label)
            .map(|t| &mut t.spring)
    }

    /// Drive one channel toward `target` under `profile`.
    ///
    /// Returns `false` for an unknown label.
    pub fn retarget(&mut self, label: &str, target: f32, profile: SpringProfile) -> bool {
        match self.get_mut(label) {
            Some(spring) => {
                spring.set_profile(profile);
                spring.retarget(target);
                true
            }
            None => false,
        }
    }

    /// Drive several channels toward targets under one shared profile.
    pub fn retarget_all(&mut self, targets: &[(&str, f32)], profile: SpringProfile) {
        for &(label, target) in targets {
            self.retarget(label, target, profile);
        }
    }

    /// Jump one channel to `value` with no animation.
    ///
    /// Returns `false` for an unknown label.
    pub fn snap(&mut self, label: &str, value: f32) -> bool {
        match self.get_mut(label) {
            Some(spring) => {
                spring.snap_to(value);
                true
            }
            None => false,
        }
    }

    /// Advance every unsettled channel by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        for track in &mut self.tracks {
            if !track.spring.is_settled() {
                track.spring.tick(dt);
            }
        }
    }

    /// Whether every channel has come to rest.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.tracks.iter().all(|t| t.spring.is_settled())
    }

    /// Iterator over (label, current value) pairs.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        self.tracks.iter().map(|t| (t.label, t.spring.value()))
    }

    /// Labels of all channels.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tracks.iter().map(|t| t.label)
    }
}
