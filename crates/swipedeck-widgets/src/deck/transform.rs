#![forbid(unsafe_code)]

//! Per-card transform derivation.
//!
//! Transforms are never ground truth. The resting pose of every card is a
//! pure function of its depth in the pile plus the configured overrides, and
//! the engine recomputes targets from that whenever the stack or the active
//! gesture changes. The springs only chase these targets.
//!
//! # Invariants
//!
//! 1. `drag_rotation` is exactly 0 for any |dx| below the configured
//!    threshold.
//! 2. `baseline_opacity` never drops below the configured floor and is not
//!    modulated by drag distance.
//! 3. `resting_target` at depth 0 equals the configured end pose.

use web_time::Duration;

use crate::deck::config::{DeckConfig, TransformSpec, defaults};

/// Which timing profile a card is currently animating under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MotionState {
    /// Parked in the pile; position derived from depth alone.
    #[default]
    Resting,
    /// Top card following the pointer.
    Dragging,
    /// Committed and animating off-screen.
    FlyingOut,
    /// Gliding back into the pile after an aborted drag or a reset.
    Resettling,
}

/// Snapshot of one card's animated state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Horizontal offset, px.
    pub x: f32,
    /// Vertical offset, px.
    pub y: f32,
    /// Degrees, positive clockwise.
    pub rotation: f32,
    /// Scale factor.
    pub scale: f32,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// Timing-profile selector for this pose.
    pub state: MotionState,
}

/// Rotation for a horizontal drag displacement, in degrees.
///
/// Zero until |dx| reaches the threshold, then proportional to distance.
#[must_use]
pub fn drag_rotation(config: &DeckConfig, dx: f32) -> f32 {
    if dx.abs() < config.rotation_threshold {
        return 0.0;
    }
    (dx / defaults::ROTATION_DIVISOR) * config.rotation_factor
}

/// Rotation of a committed card: the drag rotation plus a fixed accent in
/// the exit direction.
#[must_use]
pub fn exit_rotation(config: &DeckConfig, dx: f32, sign: f32) -> f32 {
    drag_rotation(config, dx) + sign * defaults::EXIT_ACCENT_DEGREES
}

/// Horizontal target driving a committed card fully off-screen.
#[must_use]
pub(crate) fn exit_x(config: &DeckConfig, sign: f32, dx: f32) -> f32 {
    sign * (config.effective_container_width() / 2.0 + defaults::EXIT_MARGIN + dx.abs())
}

/// Stacking-order baseline opacity for a card at `depth` below the top.
///
/// Depth 0 is the active card. Deeper cards fade in fixed steps down to a
/// floor; the fade is a function of depth only, never of drag distance.
#[must_use]
pub fn baseline_opacity(config: &DeckConfig, depth: usize) -> f32 {
    let base = config.transform_end.map_or(1.0, |t| t.opacity);
    if depth == 0 || !config.fade_effect {
        return base;
    }
    (base - depth as f32 * defaults::OPACITY_STEP).max(defaults::OPACITY_FLOOR)
}

/// Resting pose of a card at `depth` below the top.
#[must_use]
pub fn resting_target(config: &DeckConfig, depth: usize) -> CardTransform {
    let end = config.transform_end.unwrap_or_default();
    CardTransform {
        x: end.x,
        y: end.y + depth as f32 * config.y_offset,
        rotation: end.rotation,
        scale: end.scale,
        opacity: baseline_opacity(config, depth),
        state: MotionState::Resting,
    }
}

/// Entry pose cards animate in from, when an override is configured.
#[must_use]
pub(crate) fn entry_pose(spec: &TransformSpec) -> CardTransform {
    CardTransform {
        x: spec.x,
        y: spec.y,
        rotation: spec.rotation,
        scale: spec.scale,
        opacity: spec.opacity,
        state: MotionState::Resettling,
    }
}

/// Stagger delay for a card at `depth`: deeper cards start later.
#[must_use]
pub(crate) fn stagger_delay(spec: &TransformSpec, depth: usize) -> Duration {
    Duration::from_millis(spec.delay_ms.saturating_mul(depth as u64))
}
