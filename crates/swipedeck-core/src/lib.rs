#![forbid(unsafe_code)]

//! Core: geometry, time sources, deadline timers, and pointer tracking.

pub mod clock;
pub mod geometry;
pub mod pointer;
pub mod timer;

pub use clock::{Clock, LabClock};
pub use geometry::Vec2;
pub use pointer::{DragRelease, PointerTracker};
pub use timer::{TimerId, TimerQueue};
