//! Property-based invariant tests for the spring integrator.
//!
//! 1. Every built-in profile converges to any target and, once settled,
//!    reads the target exactly.
//! 2. Retargeting never moves the current value discontinuously.
//! 3. A start delay defers all motion for exactly its duration.
//! 4. `snap_to` settles instantly at the given value.

use proptest::prelude::*;
use swipedeck_motion::{Motion, Spring, SpringProfile, Tracks};
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn profile_strategy() -> impl Strategy<Value = SpringProfile> {
    prop_oneof![
        Just(SpringProfile::SNAPPY),
        Just(SpringProfile::BRISK),
        Just(SpringProfile::STEADY),
        Just(SpringProfile::GENTLE),
    ]
}

proptest! {
    #[test]
    fn every_profile_settles_exactly_on_target(
        profile in profile_strategy(),
        start in -1000f32..1000.0,
        target in -1000f32..1000.0,
    ) {
        prop_assume!((target - start).abs() > 0.1);
        let mut spring = Spring::at(start).profile(profile);
        spring.retarget(target);
        for _ in 0..2000 {
            if spring.is_settled() {
                break;
            }
            spring.tick(FRAME);
        }
        prop_assert!(spring.is_settled(), "{profile:?} did not settle");
        prop_assert_eq!(spring.value(), target);
    }
}

proptest! {
    #[test]
    fn retarget_is_continuous(
        start in -500f32..500.0,
        first in -500f32..500.0,
        second in -500f32..500.0,
        frames in 0usize..50,
    ) {
        let mut spring = Spring::at(start);
        spring.retarget(first);
        for _ in 0..frames {
            spring.tick(FRAME);
        }
        let mid = spring.value();
        spring.retarget(second);
        prop_assert_eq!(spring.value(), mid);
    }
}

proptest! {
    #[test]
    fn delay_defers_all_motion(
        delay_ms in 1u64..300,
        target in 1f32..500.0,
    ) {
        let delay = Duration::from_millis(delay_ms);
        let mut spring = Spring::at(0.0).delay(delay);
        spring.retarget(target);

        // One tick shy of the delay: no motion yet.
        spring.tick(delay - Duration::from_millis(1));
        prop_assert_eq!(spring.value(), 0.0);

        // Crossing the boundary starts integrating.
        spring.tick(Duration::from_millis(20));
        prop_assert!(spring.value() > 0.0);
    }
}

proptest! {
    #[test]
    fn snap_settles_instantly(
        start in -500f32..500.0,
        target in -500f32..500.0,
        snap in -500f32..500.0,
    ) {
        let mut spring = Spring::at(start);
        spring.retarget(target);
        spring.tick(FRAME);
        spring.snap_to(snap);
        prop_assert!(spring.is_settled());
        prop_assert_eq!(spring.value(), snap);
        prop_assert_eq!(spring.target(), snap);
    }
}

proptest! {
    #[test]
    fn tracks_settle_iff_all_channels_settle(
        targets in proptest::collection::vec(-300f32..300.0, 1..5),
    ) {
        let labels = ["x", "y", "rotation", "scale", "opacity"];
        let mut tracks = Tracks::new();
        for &label in labels.iter().take(targets.len()) {
            tracks = tracks.with(label, 0.0);
        }
        for (&label, target) in labels.iter().zip(targets.iter()) {
            tracks.retarget(label, *target, SpringProfile::STEADY);
        }

        for _ in 0..2000 {
            if tracks.is_settled() {
                break;
            }
            tracks.tick(FRAME);
        }
        prop_assert!(tracks.is_settled());
        for (&label, target) in labels.iter().zip(targets.iter()) {
            prop_assert_eq!(tracks.value(label), Some(*target));
        }
    }
}
