//! Time-driven interpolation of the displayed ratio.
//!
//! The animator holds `(start, start_time, target, duration)` and computes
//! the displayed value from a monotonic clock on each tick. Calling
//! `animate_to` mid-flight restarts from the current interpolated value.

use crate::progress::ring::{clamp_ratio, ArcGeometry, RingGeometry};
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Interpolation curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// One in-flight animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingAnimationState {
    pub start_ratio: f64,
    pub displayed_ratio: f64,
    pub target_ratio: f64,
    pub start_time: Instant,
    pub duration: Duration,
}

impl RingAnimationState {
    /// Linear progress at `now`, in `[0, 1]`.
    pub fn progress_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, now: Instant, easing: Easing) -> f64 {
        let eased = easing.apply(self.progress_at(now));
        self.start_ratio + (self.target_ratio - self.start_ratio) * eased
    }

    pub fn is_finished_at(&self, now: Instant) -> bool {
        self.progress_at(now) >= 1.0
    }
}

/// Handle for one `animate_to` call. Only the newest handle is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationId(u64);

/// Drives the displayed ratio toward a target.
#[derive(Debug)]
pub struct RingAnimator<C: Clock = MonotonicClock> {
    clock: C,
    easing: Easing,
    displayed: f64,
    active: Option<RingAnimationState>,
    generation: u64,
}

impl Default for RingAnimator<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl RingAnimator<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock, Easing::default())
    }
}

impl<C: Clock> RingAnimator<C> {
    pub fn with_clock(clock: C, easing: Easing) -> Self {
        Self {
            clock,
            easing,
            displayed: 0.0,
            active: None,
            generation: 0,
        }
    }

    /// Value as of the last tick or `animate_to`.
    pub fn displayed_ratio(&self) -> f64 {
        self.displayed
    }

    /// Where the ring is heading (the displayed value when idle).
    pub fn target_ratio(&self) -> f64 {
        self.active
            .map(|state| state.target_ratio)
            .unwrap_or(self.displayed)
    }

    pub fn state(&self) -> Option<&RingAnimationState> {
        self.active.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `id` still owns the animation. Frame timers holding an older
    /// id should stop.
    pub fn is_current(&self, id: AnimationId) -> bool {
        self.active.is_some() && id.0 == self.generation
    }

    /// Animate from the current interpolated value to `target_ratio`.
    pub fn animate_to(&mut self, target_ratio: f64, duration_ms: u64) -> AnimationId {
        let now = self.clock.now();
        let from = self.sample(now);
        let target = clamp_ratio(target_ratio);

        self.generation += 1;
        self.displayed = from;

        if duration_ms == 0 {
            self.displayed = target;
            self.active = None;
        } else {
            self.active = Some(RingAnimationState {
                start_ratio: from,
                displayed_ratio: from,
                target_ratio: target,
                start_time: now,
                duration: Duration::from_millis(duration_ms),
            });
        }

        AnimationId(self.generation)
    }

    /// Advance to the clock's current time and return the displayed ratio.
    pub fn tick(&mut self) -> f64 {
        let now = self.clock.now();
        if let Some(state) = self.active.as_mut() {
            let value = state.value_at(now, self.easing);
            state.displayed_ratio = value;
            self.displayed = value;
            if state.is_finished_at(now) {
                self.displayed = state.target_ratio;
                self.active = None;
            }
        }
        self.displayed
    }

    /// Stop any animation where it is.
    pub fn unmount(&mut self) {
        if self.active.is_some() {
            let now = self.clock.now();
            self.displayed = self.sample(now);
        }
        self.active = None;
        self.generation += 1;
    }

    /// Geometry for the displayed value.
    pub fn render(&self, geometry: &RingGeometry) -> ArcGeometry {
        geometry.render(self.displayed)
    }

    fn sample(&self, now: Instant) -> f64 {
        match &self.active {
            Some(state) => state.value_at(now, self.easing),
            None => self.displayed,
        }
    }
}
