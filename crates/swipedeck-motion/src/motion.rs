#![forbid(unsafe_code)]

//! The [`Motion`] trait: a tickable scalar animation.
//!
//! A motion owns one animated value. The host loop calls
//! [`tick`](Motion::tick) with the elapsed frame time; [`value`](Motion::value)
//! reads the current (not final) value at any point.

use web_time::Duration;

/// A tickable scalar animation.
pub trait Motion {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Current animated value.
    fn value(&self) -> f32;

    /// Whether the animation has come to rest.
    fn is_settled(&self) -> bool;

    /// Rewind to the initial state.
    fn reset(&mut self);
}
