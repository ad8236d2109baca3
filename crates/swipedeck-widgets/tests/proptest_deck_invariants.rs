//! Property-based invariant tests for the swipe deck engine.
//!
//! These verify structural invariants of the stack state machine:
//!
//! 1. Stack length is non-increasing between resets, never below the
//!    configured minimum, and each removal pops exactly the top card.
//! 2. Replacing the card list always yields a full stack with the active
//!    pointer at the end, regardless of prior history.
//! 3. A committed displacement's sign decides the directional callback, and
//!    `on_cardout` always follows it immediately.
//! 4. Rotation is exactly zero below the threshold, proportional above it.
//! 5. Baseline opacity is depth-monotone and floored.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use swipedeck_core::{Clock, LabClock, Vec2};
use swipedeck_widgets::deck::transform;
use swipedeck_widgets::{Card, DeckConfig, DeckObserver, SwipeDeck, SwipeDirection, defaults};
use web_time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Like(usize),
    Dislike(usize),
    Cardout(usize),
    Change(usize),
    Empty,
}

#[derive(Clone, Default)]
struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl<T> DeckObserver<T> for Recorder {
    fn on_change(&mut self, _current: Option<&Card<T>>, stack: &[Card<T>]) {
        self.events.borrow_mut().push(Event::Change(stack.len()));
    }

    fn on_like(&mut self, card: &Card<T>) {
        self.events.borrow_mut().push(Event::Like(card.id().index()));
    }

    fn on_dislike(&mut self, card: &Card<T>) {
        self.events
            .borrow_mut()
            .push(Event::Dislike(card.id().index()));
    }

    fn on_cardout(&mut self, card: &Card<T>) {
        self.events
            .borrow_mut()
            .push(Event::Cardout(card.id().index()));
    }

    fn on_empty(&mut self) {
        self.events.borrow_mut().push(Event::Empty);
    }
}

fn drain_one(deck: &mut SwipeDeck<usize>, lab: &LabClock, direction: SwipeDirection) -> bool {
    if !deck.swipe(direction) {
        return false;
    }
    lab.advance(Duration::from_millis(defaults::DEBOUNCE_MS + 1));
    deck.tick();
    true
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Stack monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stack_len_is_monotone_under_commits(
        len in 1usize..12,
        min in 0usize..3,
        swipes in proptest::collection::vec(proptest::bool::ANY, 0..20),
    ) {
        let lab = LabClock::new();
        let config = DeckConfig::new().min_stack_len(min);
        let mut deck = SwipeDeck::with_clock(0..len, config, Clock::lab(&lab));

        let mut previous = deck.len();
        prop_assert_eq!(previous, len);
        for rightward in swipes {
            let direction = if rightward {
                SwipeDirection::Like
            } else {
                SwipeDirection::Dislike
            };
            drain_one(&mut deck, &lab, direction);
            let current = deck.len();
            prop_assert!(current <= previous, "stack grew: {previous} -> {current}");
            prop_assert!(current >= min.min(len), "stack drained past the minimum");
            prop_assert!(previous - current <= 1, "removal popped more than the top");
            previous = current;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Reset idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reset_always_yields_a_full_stack(
        initial in 1usize..10,
        drains in 0usize..10,
        fresh in 1usize..10,
    ) {
        let lab = LabClock::new();
        let mut deck =
            SwipeDeck::with_clock(0..initial, DeckConfig::default(), Clock::lab(&lab));
        for _ in 0..drains {
            drain_one(&mut deck, &lab, SwipeDirection::Like);
        }

        deck.set_cards(0..fresh);
        prop_assert_eq!(deck.len(), fresh);
        prop_assert_eq!(
            deck.active_card().map(|c| c.id().index()),
            Some(fresh - 1)
        );
        // Every card has a live transform again.
        prop_assert_eq!(deck.transforms().count(), fresh);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Direction correctness and callback order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn committed_sign_decides_direction(dx in -400f32..400.0) {
        // Released over 10ms, anything past 5px clears the 0.25 px/ms
        // commit threshold.
        prop_assume!(dx.abs() > 5.0);
        let lab = LabClock::new();
        let recorder = Recorder::default();
        let mut deck =
            SwipeDeck::with_clock(0..4usize, DeckConfig::default(), Clock::lab(&lab));
        deck.set_observer(recorder.clone());

        let id = deck.active_card().unwrap().id();
        prop_assert!(deck.begin_drag(id, Vec2::ZERO));
        lab.advance(Duration::from_millis(10));
        // Fast enough that any nonzero displacement commits.
        deck.end_drag(Vec2::new(dx, 0.0));
        lab.advance(Duration::from_millis(defaults::DEBOUNCE_MS + 1));
        deck.tick();

        let events = recorder.events.borrow();
        let directional = if dx > 0.0 {
            Event::Like(id.index())
        } else {
            Event::Dislike(id.index())
        };
        prop_assert_eq!(
            events.as_slice(),
            &[directional, Event::Cardout(id.index()), Event::Change(3)]
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Rotation clamp
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rotation_is_zero_below_threshold(
        dx in -2000f32..2000.0,
        threshold in 1f32..200.0,
        factor in 0.1f32..4.0,
    ) {
        let config = DeckConfig::new()
            .rotation_threshold(threshold)
            .rotation_factor(factor);
        let rotation = transform::drag_rotation(&config, dx);
        if dx.abs() < threshold {
            prop_assert_eq!(rotation, 0.0);
        } else {
            let expected = dx / defaults::ROTATION_DIVISOR * factor;
            prop_assert!((rotation - expected).abs() < 1e-4);
            prop_assert_eq!(rotation.signum(), dx.signum());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Opacity baseline is depth-monotone and floored
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn opacity_baseline_monotone_in_depth(depth in 0usize..40) {
        let config = DeckConfig::default();
        let here = transform::baseline_opacity(&config, depth);
        let below = transform::baseline_opacity(&config, depth + 1);
        prop_assert!(below <= here);
        prop_assert!(below >= defaults::OPACITY_FLOOR);
        prop_assert!(here <= 1.0);
    }
}
