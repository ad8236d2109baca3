#![forbid(unsafe_code)]

//! Widgets: the gesture-driven swipe deck and its decorations.

pub mod deck;

pub use deck::{
    Card, CardId, CardOverlay, CardTransform, DeckConfig, DeckObserver, DragSample, MotionState,
    NoopObserver, SpringSet, SwipeDeck, SwipeDirection, TransformSpec, defaults,
};
