#![forbid(unsafe_code)]

//! The swipe deck engine.
//!
//! A [`SwipeDeck`] owns an ordered stack of cards — last element on top —
//! and animates each card's transform in response to pointer drags,
//! programmatic swipes, and the auto-advance timer. The host drives it
//! cooperatively: pointer events go to [`begin_drag`](SwipeDeck::begin_drag),
//! [`drag_to`](SwipeDeck::drag_to), and [`end_drag`](SwipeDeck::end_drag),
//! and [`tick`](SwipeDeck::tick) runs once per frame to advance springs and
//! fire due timers. There are no threads; dropping the deck drops every
//! pending timer with it.
//!
//! # State machine
//!
//! Per card: resting-in-stack → active-idle (became top) → active-dragging
//! (pointer down) → committed-exiting (release above the velocity
//! threshold, or a programmatic swipe) → removed (debounce elapsed). A
//! release below the threshold snaps back to active-idle. Supplying a new
//! card list resets every card to resting.
//!
//! # Invariants
//!
//! 1. Only the top card accepts a drag, and only while it is not already
//!    committed.
//! 2. Stack length is non-increasing between resets and never drops below
//!    the configured minimum.
//! 3. Within one removal: stack rebuild, then the directional callback,
//!    then `on_cardout`, then `on_change`, then (at the minimum length) the
//!    settle timer leading to `on_empty`.
//! 4. The committed-exiting flag suppresses re-entry into the interactive
//!    state until the flipped-out set is cleared at the empty boundary.

use ahash::AHashSet;
use web_time::{Duration, Instant};

use swipedeck_core::{Clock, PointerTracker, TimerId, TimerQueue, Vec2};
use swipedeck_motion::{Spring, SpringProfile, Tracks};

use crate::deck::card::{Card, CardId};
use crate::deck::config::{DeckConfig, defaults};
use crate::deck::observer::{DeckObserver, DragSample, NoopObserver};
use crate::deck::transform::{self, CardTransform, MotionState};

const X: &str = "x";
const Y: &str = "y";
const ROTATION: &str = "rotation";
const SCALE: &str = "scale";
const OPACITY: &str = "opacity";

/// Exit direction of a committed card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Rightward, positive displacement.
    Like,
    /// Leftward, negative displacement.
    Dislike,
}

impl SwipeDirection {
    /// Direction implied by a horizontal displacement's sign.
    #[must_use]
    pub const fn from_dx(dx: f32) -> Self {
        if dx < 0.0 { Self::Dislike } else { Self::Like }
    }

    /// Unit sign of the exit translation.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Like => 1.0,
            Self::Dislike => -1.0,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

/// Animated channels and phase for one card.
#[derive(Debug, Clone)]
struct CardMotion {
    id: usize,
    tracks: Tracks,
    state: MotionState,
}

fn build_motion(config: &DeckConfig, id: usize, depth: usize, profile: SpringProfile) -> CardMotion {
    let rest = transform::resting_target(config, depth);
    let (start, delay) = match config.transform_start {
        Some(spec) => (
            transform::entry_pose(&spec),
            transform::stagger_delay(&spec, depth),
        ),
        None => (rest, Duration::ZERO),
    };
    let mut tracks = Tracks::new();
    for (label, from, to) in [
        (X, start.x, rest.x),
        (Y, start.y, rest.y),
        (ROTATION, start.rotation, rest.rotation),
        (SCALE, start.scale, rest.scale),
        (OPACITY, start.opacity, rest.opacity),
    ] {
        let mut spring = Spring::at(from).profile(profile).delay(delay);
        spring.retarget(to);
        tracks.insert(label, spring);
    }
    // With no entry override, cards materialize already at rest.
    let state = if config.transform_start.is_some() {
        MotionState::Resettling
    } else {
        MotionState::Resting
    };
    CardMotion { id, tracks, state }
}

/// Gesture-driven card stack.
pub struct SwipeDeck<T> {
    config: DeckConfig,
    clock: Clock,
    stack: Vec<Card<T>>,
    /// Parallel to `stack`, same order.
    motions: Vec<CardMotion>,
    /// Original-list indices committed to leave this draining pass.
    flipped_out: AHashSet<usize>,
    tracker: PointerTracker,
    timers: TimerQueue,
    pending_removals: Vec<(TimerId, usize, SwipeDirection)>,
    settle_timer: Option<TimerId>,
    auto_timer: Option<TimerId>,
    /// Original-list index of the card under an active drag.
    dragging: Option<usize>,
    observer: Box<dyn DeckObserver<T>>,
    last_tick: Instant,
    empty_signalled: bool,
}

impl<T> std::fmt::Debug for SwipeDeck<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeDeck")
            .field("len", &self.stack.len())
            .field("flipped_out", &self.flipped_out.len())
            .field("dragging", &self.dragging)
            .field("pending_timers", &self.timers.len())
            .finish()
    }
}

impl<T> SwipeDeck<T> {
    /// Create a deck over `cards` under real wall-clock time.
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = T>, config: DeckConfig) -> Self {
        Self::with_clock(cards, config, Clock::real())
    }

    /// Create a deck driven by the given clock.
    #[must_use]
    pub fn with_clock(cards: impl IntoIterator<Item = T>, config: DeckConfig, clock: Clock) -> Self {
        let now = clock.now();
        let mut deck = Self {
            config,
            clock,
            stack: Vec::new(),
            motions: Vec::new(),
            flipped_out: AHashSet::new(),
            tracker: PointerTracker::new(),
            timers: TimerQueue::new(),
            pending_removals: Vec::new(),
            settle_timer: None,
            auto_timer: None,
            dragging: None,
            observer: Box::new(NoopObserver),
            last_tick: now,
            empty_signalled: false,
        };
        let profile = deck.config.springs.rest;
        deck.populate(cards, profile);
        if deck.config.auto_swipe {
            let interval = Duration::from_millis(defaults::AUTO_SWIPE_INTERVAL_MS);
            deck.auto_timer = Some(deck.timers.schedule_repeating(now, interval));
        }
        deck
    }

    /// Install the lifecycle observer, replacing the previous one.
    pub fn set_observer(&mut self, observer: impl DeckObserver<T> + 'static) {
        self.observer = Box::new(observer);
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Number of cards still in the stack.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no cards remain at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Whether the stack has drained to the configured minimum.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.stack.len() <= self.config.min_stack_len
    }

    /// The stack, bottom first, top (active) card last.
    #[must_use]
    pub fn stack(&self) -> &[Card<T>] {
        &self.stack
    }

    /// The top card.
    #[must_use]
    pub fn active_card(&self) -> Option<&Card<T>> {
        self.stack.last()
    }

    /// Whether `id` is still in the stack.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.stack.iter().any(|c| c.id() == id)
    }

    /// Whether `id` would accept a drag right now: it is the top card and
    /// has not been committed to leave.
    #[must_use]
    pub fn is_interactive(&self, id: CardId) -> bool {
        self.stack.last().is_some_and(|c| c.id() == id) && !self.flipped_out.contains(&id.index())
    }

    /// Live transform of one card.
    #[must_use]
    pub fn transform(&self, id: CardId) -> Option<CardTransform> {
        self.motions
            .iter()
            .find(|m| m.id == id.index())
            .map(Self::snapshot)
    }

    /// Live transforms for the whole pile, bottom first.
    pub fn transforms(&self) -> impl Iterator<Item = (CardId, CardTransform)> + '_ {
        self.motions
            .iter()
            .map(|m| (CardId::new(m.id), Self::snapshot(m)))
    }

    fn snapshot(motion: &CardMotion) -> CardTransform {
        CardTransform {
            x: motion.tracks.value(X).unwrap_or(0.0),
            y: motion.tracks.value(Y).unwrap_or(0.0),
            rotation: motion.tracks.value(ROTATION).unwrap_or(0.0),
            scale: motion.tracks.value(SCALE).unwrap_or(1.0),
            opacity: motion.tracks.value(OPACITY).unwrap_or(1.0),
            state: motion.state,
        }
    }

    /// Report the measured container width, used to normalize exit
    /// distances.
    pub fn set_container_width(&mut self, width: f32) {
        self.config.container_width = Some(width);
    }

    /// Replace the card list, resetting the stack and the active pointer in
    /// full.
    ///
    /// Pending removal and settle timers refer to the old stack and are
    /// cancelled. The flipped-out set is intentionally left alone; it is
    /// cleared only at the empty boundary.
    pub fn set_cards(&mut self, cards: impl IntoIterator<Item = T>) {
        for (timer, _, _) in self.pending_removals.drain(..) {
            self.timers.cancel(timer);
        }
        if let Some(timer) = self.settle_timer.take() {
            self.timers.cancel(timer);
        }
        if self.dragging.take().is_some() {
            self.tracker.cancel();
        }
        self.empty_signalled = false;
        let profile = self.config.springs.resettle;
        self.populate(cards, profile);
        #[cfg(feature = "tracing")]
        log_reset(self.stack.len());
        self.observer.on_change(self.stack.last(), &self.stack);
    }

    fn populate(&mut self, cards: impl IntoIterator<Item = T>, profile: SpringProfile) {
        self.stack = cards
            .into_iter()
            .enumerate()
            .map(|(index, payload)| Card::new(CardId::new(index), payload))
            .collect();
        let len = self.stack.len();
        self.motions = (0..len)
            .map(|pos| build_motion(&self.config, pos, len - 1 - pos, profile))
            .collect();
    }

    /// Start dragging card `id` at `position`.
    ///
    /// Returns `false` — and changes nothing — unless `id` is the top card,
    /// not yet committed, and no drag is already in progress.
    pub fn begin_drag(&mut self, id: CardId, position: Vec2) -> bool {
        if !self.is_interactive(id) || self.dragging.is_some() {
            #[cfg(feature = "tracing")]
            log_drag_rejected(id.index());
            return false;
        }
        self.tracker.begin(position, self.clock.now());
        self.dragging = Some(id.index());
        let scale = self.config.drag_scale;
        let profile = self.config.springs.drag;
        if let Some(motion) = self.motion_mut(id.index()) {
            motion.state = MotionState::Dragging;
            motion.tracks.retarget(SCALE, scale, profile);
        }
        true
    }

    /// Record a pointer move of the active drag.
    ///
    /// No-op when no drag is in progress.
    pub fn drag_to(&mut self, position: Vec2) {
        let Some(active) = self.dragging else {
            return;
        };
        let d = self.tracker.update(position, self.clock.now());
        let rest = transform::resting_target(&self.config, 0);
        let rotation = transform::drag_rotation(&self.config, d.x);
        let scale = self.config.drag_scale;
        let profile = self.config.springs.drag;
        if let Some(motion) = self.motion_mut(active) {
            motion.state = MotionState::Dragging;
            motion.tracks.retarget_all(
                &[
                    (X, rest.x + d.x),
                    (Y, rest.y + d.y),
                    (ROTATION, rotation),
                    (SCALE, scale),
                ],
                profile,
            );
        }
        self.observer.on_animation(DragSample {
            x: d.x,
            rotation,
            scale,
        });
    }

    /// Release the active drag at `position`.
    ///
    /// Commits to a swipe when the release speed exceeds the configured
    /// threshold and the stack is above its minimum length; otherwise the
    /// card snaps back into the pile.
    pub fn end_drag(&mut self, position: Vec2) {
        let Some(active) = self.dragging.take() else {
            return;
        };
        let Some(release) = self.tracker.finish(position, self.clock.now()) else {
            return;
        };
        let committable = release.speed() > self.config.max_velocity
            && self.stack.len() > self.config.min_stack_len;
        if committable {
            let dx = release.displacement.x;
            self.commit(active, SwipeDirection::from_dx(dx), dx);
        } else {
            self.snap_back(active);
        }
    }

    /// Commit the top card programmatically, at full strength, in
    /// `direction`. Auto-advance routes through here.
    ///
    /// Returns `false` when there is nothing to commit: a drag is in
    /// progress, the stack is at its minimum, or the top card is already
    /// leaving.
    pub fn swipe(&mut self, direction: SwipeDirection) -> bool {
        if self.dragging.is_some() || self.stack.len() <= self.config.min_stack_len {
            return false;
        }
        let Some(top) = self.stack.last().map(|c| c.id().index()) else {
            return false;
        };
        if self.flipped_out.contains(&top) {
            return false;
        }
        self.commit(
            top,
            direction,
            direction.sign() * defaults::AUTO_SWIPE_DISPLACEMENT,
        );
        true
    }

    /// Advance springs and fire due timers. Call once per frame.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let dt = now.duration_since(self.last_tick);
        self.last_tick = now;
        for motion in &mut self.motions {
            motion.tracks.tick(dt);
            if motion.state == MotionState::Resettling && motion.tracks.is_settled() {
                motion.state = MotionState::Resting;
            }
        }
        for timer in self.timers.poll(now) {
            self.fire(timer);
        }
    }

    /// Cancel every pending timer and any drag in progress.
    ///
    /// After shutdown no callback fires until the host interacts again; a
    /// dropped deck gets the same guarantee for free.
    pub fn shutdown(&mut self) {
        self.timers.clear();
        self.pending_removals.clear();
        self.settle_timer = None;
        self.auto_timer = None;
        self.tracker.cancel();
        self.dragging = None;
    }

    fn motion_mut(&mut self, id: usize) -> Option<&mut CardMotion> {
        self.motions.iter_mut().find(|m| m.id == id)
    }

    fn snap_back(&mut self, id: usize) {
        let rest = transform::resting_target(&self.config, 0);
        let profile = self.config.springs.resettle;
        if let Some(motion) = self.motion_mut(id) {
            motion.state = MotionState::Resettling;
            motion.tracks.retarget_all(
                &[
                    (X, rest.x),
                    (Y, rest.y),
                    (ROTATION, rest.rotation),
                    (SCALE, rest.scale),
                    (OPACITY, rest.opacity),
                ],
                profile,
            );
        }
    }

    fn commit(&mut self, id: usize, direction: SwipeDirection, dx: f32) {
        let now = self.clock.now();
        self.flipped_out.insert(id);
        let exit_x = transform::exit_x(&self.config, direction.sign(), dx);
        let rotation = transform::exit_rotation(&self.config, dx, direction.sign());
        let profile = self.config.springs.fly_out;
        if let Some(motion) = self.motion_mut(id) {
            motion.state = MotionState::FlyingOut;
            motion
                .tracks
                .retarget_all(&[(X, exit_x), (ROTATION, rotation)], profile);
        }
        let timer = self.timers.schedule_once(now, self.config.debounce);
        self.pending_removals.push((timer, id, direction));
        #[cfg(feature = "tracing")]
        log_commit(id, direction.label());
    }

    fn fire(&mut self, timer: TimerId) {
        if let Some(pos) = self
            .pending_removals
            .iter()
            .position(|&(t, _, _)| t == timer)
        {
            let (_, card, direction) = self.pending_removals.remove(pos);
            self.remove_committed(card, direction);
        } else if self.settle_timer == Some(timer) {
            self.settle_timer = None;
            self.flipped_out.clear();
            self.empty_signalled = true;
            #[cfg(feature = "tracing")]
            log_empty();
            self.observer.on_empty();
        } else if self.auto_timer == Some(timer) {
            let _ = self.swipe(SwipeDirection::Like);
        }
    }

    fn remove_committed(&mut self, card: usize, direction: SwipeDirection) {
        // Rebuild by retaining strictly-lower original indices; the
        // committed card was the top, so this pops it.
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.stack.len());
        for entry in self.stack.drain(..) {
            if entry.id().index() < card {
                kept.push(entry);
            } else {
                removed.push(entry);
            }
        }
        self.stack = kept;
        self.motions.retain(|m| m.id < card);
        debug_assert_eq!(self.motions.len(), self.stack.len());

        // Remaining cards shift one slot toward the top.
        let len = self.stack.len();
        let profile = self.config.springs.rest;
        for pos in 0..len {
            let rest = transform::resting_target(&self.config, len - 1 - pos);
            let motion = &mut self.motions[pos];
            motion.state = MotionState::Resting;
            motion.tracks.retarget_all(
                &[
                    (X, rest.x),
                    (Y, rest.y),
                    (ROTATION, rest.rotation),
                    (SCALE, rest.scale),
                    (OPACITY, rest.opacity),
                ],
                profile,
            );
        }

        #[cfg(feature = "tracing")]
        log_remove(card, len);
        for entry in &removed {
            match direction {
                SwipeDirection::Like => self.observer.on_like(entry),
                SwipeDirection::Dislike => self.observer.on_dislike(entry),
            }
            self.observer.on_cardout(entry);
        }
        self.observer.on_change(self.stack.last(), &self.stack);

        if self.stack.len() == self.config.min_stack_len
            && !self.empty_signalled
            && self.settle_timer.is_none()
        {
            self.settle_timer = Some(
                self.timers
                    .schedule_once(self.clock.now(), self.config.debounce),
            );
        }
    }
}

#[cfg(feature = "tracing")]
fn log_commit(card: usize, direction: &'static str) {
    tracing::debug!(message = "deck.commit", card, direction);
}

#[cfg(feature = "tracing")]
fn log_remove(card: usize, remaining: usize) {
    tracing::debug!(message = "deck.remove", card, remaining);
}

#[cfg(feature = "tracing")]
fn log_reset(len: usize) {
    tracing::debug!(message = "deck.reset", len);
}

#[cfg(feature = "tracing")]
fn log_empty() {
    tracing::debug!(message = "deck.empty");
}

#[cfg(feature = "tracing")]
fn log_drag_rejected(card: usize) {
    tracing::trace!(message = "deck.drag_rejected", card);
}
