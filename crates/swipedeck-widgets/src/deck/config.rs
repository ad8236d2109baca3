#![forbid(unsafe_code)]

//! Deck configuration: tuning constants, per-axis transform overrides, and
//! the per-state spring profiles.
//!
//! Everything has a default; a bare `DeckConfig::default()` produces the
//! stock feel. Tuning lives in [`defaults`] so every deck in an
//! application shifts together.

use web_time::Duration;

use swipedeck_motion::SpringProfile;

/// Stock tuning values.
pub mod defaults {
    /// Stack size at which the deck counts as empty.
    pub const MIN_STACK_LEN: usize = 1;
    /// Vertical spacing between stacked cards, px per depth step.
    pub const Y_OFFSET: f32 = 5.0;
    /// Release speed, px/ms, above which a release commits to a swipe.
    pub const MAX_VELOCITY: f32 = 0.25;
    /// Settle delay between a commit and its stack mutation, ms.
    pub const DEBOUNCE_MS: u64 = 100;
    /// Multiplier from drag distance to rotation.
    pub const ROTATION_FACTOR: f32 = 1.0;
    /// Horizontal displacement, px, below which rotation stays zero.
    pub const ROTATION_THRESHOLD: f32 = 50.0;
    /// Drag distance, px, per degree of rotation (before the factor).
    pub const ROTATION_DIVISOR: f32 = 100.0;
    /// Scale applied to the active card while it is being dragged.
    pub const DRAG_SCALE: f32 = 1.05;
    /// Interval between automatic advance commits, ms.
    pub const AUTO_SWIPE_INTERVAL_MS: u64 = 3000;
    /// Synthetic displacement used by automatic and programmatic swipes, px.
    pub const AUTO_SWIPE_DISPLACEMENT: f32 = 300.0;
    /// Extra rotation added in the commit direction while exiting, degrees.
    pub const EXIT_ACCENT_DEGREES: f32 = 10.0;
    /// Opacity lost per depth step below the top card.
    pub const OPACITY_STEP: f32 = 0.15;
    /// Opacity floor for cards deep in the pile.
    pub const OPACITY_FLOOR: f32 = 0.25;
    /// How far past the container edge an exiting card is driven, px.
    pub const EXIT_MARGIN: f32 = 80.0;
    /// Container width assumed until the host reports a measurement, px.
    pub const FALLBACK_CONTAINER_WIDTH: f32 = 320.0;
}

/// Per-axis transform constants used for entry/resting theming.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformSpec {
    pub x: f32,
    pub y: f32,
    /// Degrees.
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Stagger step: each depth level waits this much longer, ms.
    pub delay_ms: u64,
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
            delay_ms: 0,
        }
    }
}

/// Spring profiles for the four animated card states.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringSet {
    /// Top card following the pointer.
    pub drag: SpringProfile,
    /// Committed card flying off-screen.
    pub fly_out: SpringProfile,
    /// Cards shifting into new resting slots.
    pub rest: SpringProfile,
    /// The whole pile settling after a reset or an aborted drag.
    pub resettle: SpringProfile,
}

impl Default for SpringSet {
    fn default() -> Self {
        Self {
            drag: SpringProfile::SNAPPY,
            fly_out: SpringProfile::BRISK,
            rest: SpringProfile::STEADY,
            resettle: SpringProfile::GENTLE,
        }
    }
}

/// Full deck configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckConfig {
    /// Pixel width used to normalize exit distances. `None` until the host
    /// measures its container.
    pub container_width: Option<f32>,
    /// Stack size at which the deck is considered empty.
    pub min_stack_len: usize,
    /// Vertical spacing between stacked cards, px per depth step.
    pub y_offset: f32,
    /// Release speed threshold, px/ms.
    pub max_velocity: f32,
    /// Delay between commit and stack mutation (and before the empty
    /// signal), letting the exit animation play.
    pub debounce: Duration,
    /// Drag-distance-to-rotation multiplier.
    pub rotation_factor: f32,
    /// Minimum |dx| in px before any rotation is applied.
    pub rotation_threshold: f32,
    /// Scale of the active card while dragged.
    pub drag_scale: f32,
    /// Whether stacked cards fade by depth.
    pub fade_effect: bool,
    /// Automatic rightward advance every 3 seconds.
    pub auto_swipe: bool,
    /// Entry transform overrides (cards animate in from these values).
    pub transform_start: Option<TransformSpec>,
    /// Resting transform overrides.
    pub transform_end: Option<TransformSpec>,
    /// Per-state timing profiles.
    pub springs: SpringSet,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            container_width: None,
            min_stack_len: defaults::MIN_STACK_LEN,
            y_offset: defaults::Y_OFFSET,
            max_velocity: defaults::MAX_VELOCITY,
            debounce: Duration::from_millis(defaults::DEBOUNCE_MS),
            rotation_factor: defaults::ROTATION_FACTOR,
            rotation_threshold: defaults::ROTATION_THRESHOLD,
            drag_scale: defaults::DRAG_SCALE,
            fade_effect: true,
            auto_swipe: false,
            transform_start: None,
            transform_end: None,
            springs: SpringSet::default(),
        }
    }
}

impl DeckConfig {
    /// Stock configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container width used for exit distance normalization.
    #[must_use]
    pub fn container_width(mut self, width: f32) -> Self {
        self.container_width = Some(width);
        self
    }

    /// Set the stack size at which the deck counts as empty.
    #[must_use]
    pub fn min_stack_len(mut self, len: usize) -> Self {
        self.min_stack_len = len;
        self
    }

    /// Set the vertical spacing between stacked cards.
    #[must_use]
    pub fn y_offset(mut self, px: f32) -> Self {
        self.y_offset = px;
        self
    }

    /// Set the release speed threshold in px/ms.
    #[must_use]
    pub fn max_velocity(mut self, speed: f32) -> Self {
        self.max_velocity = speed;
        self
    }

    /// Set the settle delay between commit and stack mutation.
    #[must_use]
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the drag-to-rotation multiplier.
    #[must_use]
    pub fn rotation_factor(mut self, factor: f32) -> Self {
        self.rotation_factor = factor;
        self
    }

    /// Set the minimum |dx| before rotation applies.
    #[must_use]
    pub fn rotation_threshold(mut self, px: f32) -> Self {
        self.rotation_threshold = px;
        self
    }

    /// Set the active-card scale while dragged.
    #[must_use]
    pub fn drag_scale(mut self, scale: f32) -> Self {
        self.drag_scale = scale;
        self
    }

    /// Enable or disable depth-based fading of stacked cards.
    #[must_use]
    pub fn fade_effect(mut self, on: bool) -> Self {
        self.fade_effect = on;
        self
    }

    /// Enable or disable the automatic advance timer.
    #[must_use]
    pub fn auto_swipe(mut self, on: bool) -> Self {
        self.auto_swipe = on;
        self
    }

    /// Set entry transform overrides.
    #[must_use]
    pub fn transform_start(mut self, spec: TransformSpec) -> Self {
        self.transform_start = Some(spec);
        self
    }

    /// Set resting transform overrides.
    #[must_use]
    pub fn transform_end(mut self, spec: TransformSpec) -> Self {
        self.transform_end = Some(spec);
        self
    }

    /// Set the per-state spring profiles.
    #[must_use]
    pub fn springs(mut self, springs: SpringSet) -> Self {
        self.springs = springs;
        self
    }

    /// Effective container width: the configured/measured value, or the
    /// fallback when the host has not reported one.
    #[must_use]
    pub fn effective_container_width(&self) -> f32 {
        self.container_width
            .unwrap_or(defaults::FALLBACK_CONTAINER_WIDTH)
    }
}
