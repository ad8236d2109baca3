#![forbid(unsafe_code)]

//! Card overlay: a decoration pinned to one card of a deck.
//!
//! An overlay snapshots a card's live transform plus a directional hint
//! strength, so hosts can draw stamps ("LIKE" / "NOPE"), progress pips, or
//! parallax chrome that follow the card. The deck handle is passed
//! explicitly at construction; attaching an overlay to a card the deck does
//! not contain is a wiring bug, not a runtime condition, and panics.

use crate::deck::card::CardId;
use crate::deck::engine::{SwipeDeck, SwipeDirection};
use crate::deck::transform::CardTransform;

/// Snapshot decoration for one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardOverlay {
    id: CardId,
    transform: CardTransform,
    /// Signed hint: positive toward like, negative toward dislike.
    strength: f32,
}

impl CardOverlay {
    /// Snapshot an overlay for `id`.
    ///
    /// # Panics
    ///
    /// Panics when the deck does not contain `id`.
    #[must_use]
    pub fn for_card<T>(deck: &SwipeDeck<T>, id: CardId) -> Self {
        let transform = deck
            .transform(id)
            .unwrap_or_else(|| panic!("overlay attached to card {} outside the deck", id.index()));
        let half_width = deck.config().effective_container_width() / 2.0;
        let strength = (transform.x / half_width).clamp(-1.0, 1.0);
        Self {
            id,
            transform,
            strength,
        }
    }

    /// The decorated card.
    #[inline]
    #[must_use]
    pub const fn card(&self) -> CardId {
        self.id
    }

    /// The card's transform at snapshot time.
    #[inline]
    #[must_use]
    pub const fn transform(&self) -> &CardTransform {
        &self.transform
    }

    /// Which way the card is leaning, if it has left center at all.
    #[must_use]
    pub fn hint(&self) -> Option<SwipeDirection> {
        if self.strength == 0.0 {
            None
        } else {
            Some(SwipeDirection::from_dx(self.strength))
        }
    }

    /// Like-hint intensity, 0.0 at center to 1.0 at half the container
    /// width.
    #[must_use]
    pub fn like_strength(&self) -> f32 {
        self.strength.max(0.0)
    }

    /// Dislike-hint intensity, 0.0 to 1.0.
    #[must_use]
    pub fn dislike_strength(&self) -> f32 {
        (-self.strength).max(0.0)
    }
}
