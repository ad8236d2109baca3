#![forbid(unsafe_code)]

//! Damped spring integrator with named timing profiles.
//!
//! A [`Spring`] drives one scalar toward a target under Hooke's law with
//! viscous damping, integrated semi-implicitly at a fixed substep so the
//! result is independent of the host frame rate. Retargeting mid-flight
//! keeps the current position and velocity, which is what makes a
//! released card glide smoothly from "following the finger" into
//! "snapping back" or "flying out".
//!
//! # Invariants
//!
//! 1. A settled spring reads exactly its target (no residual epsilon).
//! 2. `retarget` never discontinuously moves the current value.
//! 3. `tick` while the start delay is pending consumes the delay before
//!    any integration happens.
//!
//! # Failure Modes
//!
//! - Zero/negative stiffness, damping, or mass would diverge; profiles are
//!   validated with a debug assertion at construction.

use web_time::Duration;

use crate::motion::Motion;

/// Integration substep. Semi-implicit Euler is stable for every built-in
/// profile at this step size.
const MAX_STEP: Duration = Duration::from_millis(4);

/// Rest thresholds: position distance to target and velocity magnitude.
const POS_EPS: f32 = 0.01;
const VEL_EPS: f32 = 0.01;

/// Stiffness/damping/mass triple describing a spring's feel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringProfile {
    /// Hooke constant, 1/s² at unit mass.
    pub stiffness: f32,
    /// Viscous damping coefficient.
    pub damping: f32,
    /// Moving mass.
    pub mass: f32,
}

impl SpringProfile {
    /// Tight, fast follow — tracks a dragged pointer.
    pub const SNAPPY: Self = Self::new(300.0, 28.0);
    /// Fast, slightly loose — a card flying off-screen.
    pub const BRISK: Self = Self::new(210.0, 20.0);
    /// Neutral default — cards at rest in the pile.
    pub const STEADY: Self = Self::new(170.0, 26.0);
    /// Soft and slow — the pile settling after a reset.
    pub const GENTLE: Self = Self::new(120.0, 14.0);

    /// A unit-mass profile.
    #[must_use]
    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }
}

impl Default for SpringProfile {
    fn default() -> Self {
        Self::STEADY
    }
}

/// One scalar animated toward a target by a damped spring.
#[derive(Debug, Clone)]
pub struct Spring {
    profile: SpringProfile,
    start: f32,
    position: f32,
    velocity: f32,
    target: f32,
    delay: Duration,
    waited: Duration,
}

impl Spring {
    /// Create a spring resting at `value` (target == position).
    #[must_use]
    pub fn at(value: f32) -> Self {
        Self {
            profile: SpringProfile::default(),
            start: value,
            position: value,
            velocity: 0.0,
            target: value,
            delay: Duration::ZERO,
            waited: Duration::ZERO,
        }
    }

    /// Set the timing profile (builder).
    #[must_use]
    pub fn profile(mut self, profile: SpringProfile) -> Self {
        debug_assert!(
            profile.stiffness > 0.0 && profile.damping > 0.0 && profile.mass > 0.0,
            "spring profile must be strictly positive"
        );
        self.profile = profile;
        self
    }

    /// Set a start delay consumed before the first integration step
    /// (builder). The delay re-arms on [`reset`](Motion::reset).
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Drive toward a new target, keeping position and velocity.
    pub fn retarget(&mut self, target: f32) {
        self.target = target;
    }

    /// Swap the timing profile mid-flight.
    pub fn set_profile(&mut self, profile: SpringProfile) {
        self.profile = profile;
    }

    /// Jump to `value` with no animation: position, target, and velocity
    /// all land there immediately.
    pub fn snap_to(&mut self, value: f32) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
    }

    fn step(&mut self, dt: Duration) {
        let dt_s = dt.as_secs_f32();
        let displacement = self.position - self.target;
        let force = -self.profile.stiffness * displacement - self.profile.damping * self.velocity;
        self.velocity += force / self.profile.mass * dt_s;
        self.position += self.velocity * dt_s;
    }
}

impl Motion for Spring {
    fn tick(&mut self, dt: Duration) {
        let mut remaining = dt;

        // Consume a pending start delay first.
        if self.waited < self.delay {
            let pending = self.delay - self.waited;
            if remaining <= pending {
                self.waited += remaining;
                return;
            }
            self.waited = self.delay;
            remaining -= pending;
        }

        while !remaining.is_zero() && !self.is_settled() {
            let step = remaining.min(MAX_STEP);
            self.step(step);
            remaining -= step;
        }
        if self.is_settled() {
            self.position = self.target;
            self.velocity = 0.0;
        }
    }

    fn value(&self) -> f32 {
        self.position
    }

    fn is_settled(&self) -> bool {
        (self.position - self.target).abs() < POS_EPS && self.velocity.abs() < VEL_EPS
    }

    fn reset(&mut self) {
        self.position = self.start;
        self.velocity = 0.0;
        self.waited = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(FRAME);
        }
    }

    #[test]
    fn resting_spring_is_settled() {
        let spring = Spring::at(5.0);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 5.0);
    }

    #[test]
    fn converges_to_target() {
        let mut spring = Spring::at(0.0).profile(SpringProfile::STEADY);
        spring.retarget(100.0);
        assert!(!spring.is_settled());
        run(&mut spring, 200);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);
    }

    #[test]
    fn every_preset_converges() {
        for profile in [
            SpringProfile::SNAPPY,
            SpringProfile::BRISK,
            SpringProfile::STEADY,
            SpringProfile::GENTLE,
        ] {
            let mut spring = Spring::at(0.0).profile(profile);
            spring.retarget(-250.0);
            run(&mut spring, 400);
            assert!(spring.is_settled(), "{profile:?} did not settle");
            assert_eq!(spring.value(), -250.0);
        }
    }

    #[test]
    fn snappy_settles_faster_than_gentle() {
        let mut snappy = Spring::at(0.0).profile(SpringProfile::SNAPPY);
        let mut gentle = Spring::at(0.0).profile(SpringProfile::GENTLE);
        snappy.retarget(50.0);
        gentle.retarget(50.0);

        let mut snappy_frames = 0;
        while !snappy.is_settled() && snappy_frames < 1000 {
            snappy.tick(FRAME);
            snappy_frames += 1;
        }
        let mut gentle_frames = 0;
        while !gentle.is_settled() && gentle_frames < 1000 {
            gentle.tick(FRAME);
            gentle_frames += 1;
        }
        assert!(snappy_frames < gentle_frames, "{snappy_frames} vs {gentle_frames}");
    }

    #[test]
    fn retarget_keeps_position() {
        let mut spring = Spring::at(0.0);
        spring.retarget(100.0);
        run(&mut spring, 5);
        let mid = spring.value();
        spring.retarget(-100.0);
        assert_eq!(spring.value(), mid);
    }

    #[test]
    fn snap_to_settles_instantly() {
        let mut spring = Spring::at(0.0);
        spring.retarget(100.0);
        run(&mut spring, 3);
        spring.snap_to(42.0);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 42.0);
        assert_eq!(spring.target(), 42.0);
    }

    #[test]
    fn delay_defers_motion() {
        let mut spring = Spring::at(0.0).delay(Duration::from_millis(100));
        spring.retarget(10.0);
        spring.tick(Duration::from_millis(60));
        assert_eq!(spring.value(), 0.0);
        spring.tick(Duration::from_millis(60));
        assert!(spring.value() > 0.0);
    }

    #[test]
    fn tick_spanning_delay_integrates_remainder() {
        let mut spring = Spring::at(0.0).delay(Duration::from_millis(50));
        spring.retarget(10.0);
        // One big tick: 50ms of delay plus 100ms of motion.
        spring.tick(Duration::from_millis(150));
        assert!(spring.value() > 0.0);
    }

    #[test]
    fn reset_rearms_delay_and_rewinds() {
        let mut spring = Spring::at(1.0).delay(Duration::from_millis(40));
        spring.retarget(9.0);
        run(&mut spring, 20);
        spring.reset();
        assert_eq!(spring.value(), 1.0);
        spring.tick(Duration::from_millis(20));
        assert_eq!(spring.value(), 1.0);
    }

    #[test]
    fn frame_rate_independence() {
        // Same wall time at different tick granularities lands in the
        // same neighborhood (identical up to the substep boundary).
        let mut coarse = Spring::at(0.0);
        let mut fine = Spring::at(0.0);
        coarse.retarget(100.0);
        fine.retarget(100.0);

        coarse.tick(Duration::from_millis(320));
        for _ in 0..40 {
            fine.tick(Duration::from_millis(8));
        }
        assert!((coarse.value() - fine.value()).abs() < 0.5);
    }
}
