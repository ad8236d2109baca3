#![forbid(unsafe_code)]

//! Motion: damped-spring integration and labeled channel tracks.

pub mod motion;
pub mod spring;
pub mod tracks;

pub use motion::Motion;
pub use spring::{Spring, SpringProfile};
pub use tracks::Tracks;
