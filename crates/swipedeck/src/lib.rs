#![forbid(unsafe_code)]

//! Swipedeck public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub use swipedeck_widgets::{
    Card, CardId, CardOverlay, CardTransform, DeckConfig, DeckObserver, DragSample, MotionState,
    SwipeDeck, SwipeDirection,
};

pub mod prelude {
    pub use swipedeck_core as core;
    pub use swipedeck_motion as motion;
    pub use swipedeck_widgets as widgets;

    pub use swipedeck_core::{Clock, LabClock, Vec2};
    pub use swipedeck_motion::{Motion, Spring, SpringProfile, Tracks};
    pub use swipedeck_widgets::{
        Card, CardId, CardOverlay, CardTransform, DeckConfig, DeckObserver, DragSample,
        MotionState, NoopObserver, SpringSet, SwipeDeck, SwipeDirection, TransformSpec,
    };
}
