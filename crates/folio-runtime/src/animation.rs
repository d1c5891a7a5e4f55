#![forbid(unsafe_code)]

//! Composable animation primitives.
//!
//! Two layers:
//!
//! - [`Animation`] values ([`Fade`]) produce a normalized `f32` over time,
//!   for one-off effects owned by a single view.
//! - [`Timeline`] runs declarative [`Transition`] descriptors — plain
//!   `{target, from, to, duration, delay}` data — so sequencing lives in
//!   descriptor lists, not imperative calls. A view describes its entrance
//!   as data and feeds the timeline ticks.
//!
//! All outputs are clamped; zero durations complete on the first tick
//! rather than dividing by zero.

use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Easing
// ─────────────────────────────────────────────────────────────────────────────

/// Easing function: maps `t` in [0, 1] to an eased value in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Constant velocity.
#[inline]
#[must_use]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
#[must_use]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[inline]
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-out (slower end than quadratic).
#[inline]
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

// ─────────────────────────────────────────────────────────────────────────────
// Animation trait + Fade
// ─────────────────────────────────────────────────────────────────────────────

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the end has been reached.
    fn is_complete(&self) -> bool;

    /// Current output, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// Progression from 0.0 to 1.0 over a duration with configurable easing.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade with linear easing.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: duration.max(Duration::from_nanos(1)),
            easing: linear,
        }
    }

    /// Set the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.easing)((t as f32).clamp(0.0, 1.0))
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transitions + Timeline
// ─────────────────────────────────────────────────────────────────────────────

/// A declarative transition descriptor: pure data, applied by [`Timeline`].
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub target: &'static str,
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: EasingFn,
}

impl Transition {
    /// A transition with no delay and ease-out easing.
    #[must_use]
    pub fn new(target: &'static str, from: f32, to: f32, duration: Duration) -> Self {
        Self {
            target,
            from,
            to,
            duration: duration.max(Duration::from_nanos(1)),
            delay: Duration::ZERO,
            easing: ease_out,
        }
    }

    /// Set the start delay.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// The same movement played backwards (endpoints swapped).
    #[must_use]
    pub fn reversed(mut self) -> Self {
        std::mem::swap(&mut self.from, &mut self.to);
        self
    }
}

#[derive(Debug, Clone)]
struct Track {
    spec: Transition,
    elapsed: Duration,
}

impl Track {
    fn value(&self) -> f32 {
        if self.elapsed <= self.spec.delay {
            return self.spec.from;
        }
        let active = self.elapsed - self.spec.delay;
        let t = (active.as_secs_f64() / self.spec.duration.as_secs_f64()) as f32;
        let eased = (self.spec.easing)(t.clamp(0.0, 1.0));
        self.spec.from + (self.spec.to - self.spec.from) * eased
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.spec.delay + self.spec.duration
    }
}

/// Runs a set of transition descriptors, one track per target.
///
/// Pushing a descriptor for a target that already has a track replaces it
/// (last write wins), which is how a moving target — the loading bar chasing
/// its value — stays smooth.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    tracks: Vec<Track>,
}

impl Timeline {
    /// An empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a list of descriptors, replacing any current tracks.
    #[must_use]
    pub fn with_transitions(specs: impl IntoIterator<Item = Transition>) -> Self {
        let mut timeline = Self::new();
        for spec in specs {
            timeline.push(spec);
        }
        timeline
    }

    /// Add (or replace) the track for a descriptor's target.
    pub fn push(&mut self, spec: Transition) {
        if let Some(track) = self.tracks.iter_mut().find(|t| t.spec.target == spec.target) {
            *track = Track {
                spec,
                elapsed: Duration::ZERO,
            };
        } else {
            self.tracks.push(Track {
                spec,
                elapsed: Duration::ZERO,
            });
        }
    }

    /// Advance every track.
    pub fn tick(&mut self, dt: Duration) {
        for track in &mut self.tracks {
            track.elapsed = track.elapsed.saturating_add(dt);
        }
    }

    /// Current value for a target, if it has a track.
    #[must_use]
    pub fn value(&self, target: &str) -> Option<f32> {
        self.tracks
            .iter()
            .find(|t| t.spec.target == target)
            .map(Track::value)
    }

    /// Value for a target, or `fallback` when it has no track.
    #[must_use]
    pub fn value_or(&self, target: &str, fallback: f32) -> f32 {
        self.value(target).unwrap_or(fallback)
    }

    /// Whether every track has finished (an empty timeline is idle).
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tracks.iter().all(Track::is_complete)
    }

    /// Drop all tracks.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

/// Linear stagger offsets for cascading list entrances: item `i` starts at
/// `i * step`.
#[must_use]
pub fn stagger_offsets(count: usize, step: Duration) -> Vec<Duration> {
    (0..count).map(|i| step.saturating_mul(i as u32)).collect()
}
