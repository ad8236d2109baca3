#![forbid(unsafe_code)]

//! Deck lifecycle observer.
//!
//! The engine reports every externally visible event through a single
//! [`DeckObserver`] installed on the deck. All methods have empty defaults,
//! so an observer implements only what it cares about.
//!
//! Ordering is part of the contract: when a card leaves the stack, the
//! directional callback ([`on_like`](DeckObserver::on_like) or
//! [`on_dislike`](DeckObserver::on_dislike)) always precedes
//! [`on_cardout`](DeckObserver::on_cardout), which precedes
//! [`on_change`](DeckObserver::on_change). Consumers may rely on this.

use crate::deck::card::Card;

/// Live transform of the dragged card, mirrored to the observer on every
/// pointer move so hosts can drive parallel indicators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Horizontal displacement from the resting slot, px.
    pub x: f32,
    /// Degrees.
    pub rotation: f32,
    /// Scale factor of the dragged card.
    pub scale: f32,
}

/// Receiver for deck lifecycle events. All methods default to no-ops.
pub trait DeckObserver<T> {
    /// Stack contents or the active-card pointer changed.
    fn on_change(&mut self, current: Option<&Card<T>>, stack: &[Card<T>]) {
        let _ = (current, stack);
    }

    /// A card left the stack via a positive (rightward) swipe.
    fn on_like(&mut self, card: &Card<T>) {
        let _ = card;
    }

    /// A card left the stack via a negative (leftward) swipe.
    fn on_dislike(&mut self, card: &Card<T>) {
        let _ = card;
    }

    /// A card left the stack, in either direction. Always fires after the
    /// directional callback.
    fn on_cardout(&mut self, card: &Card<T>) {
        let _ = card;
    }

    /// The top card moved under an active drag.
    fn on_animation(&mut self, sample: DragSample) {
        let _ = sample;
    }

    /// The stack drained to its minimum length and the settle delay
    /// elapsed. Fires once per draining pass.
    fn on_empty(&mut self) {}
}

/// Observer that ignores every event. Installed until the host provides one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<T> DeckObserver<T> for NoopObserver {}
