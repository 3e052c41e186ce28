//! Dose progress ring.
//!
//! `ring` holds the pure geometry, `animation` the time-driven
//! interpolator. `ProgressRing` ties them to a `DoseSummary`.

pub mod animation;
pub mod ring;

pub use animation::{AnimationId, Clock, Easing, MonotonicClock, RingAnimationState, RingAnimator};
pub use ring::{clamp_ratio, ArcGeometry, RingGeometry};

use crate::config::ring as defaults;
use crate::dose::DoseSummary;
use log::debug;

/// Ring component state for one dashboard instance.
///
/// Reads only the ratio derived from each summary; never mutates it.
#[derive(Debug)]
pub struct ProgressRing<C: Clock = MonotonicClock> {
    geometry: RingGeometry,
    animator: RingAnimator<C>,
    duration_ms: u64,
    summary: DoseSummary,
}

impl Default for ProgressRing<MonotonicClock> {
    fn default() -> Self {
        Self::new(RingGeometry::default())
    }
}

impl ProgressRing<MonotonicClock> {
    pub fn new(geometry: RingGeometry) -> Self {
        Self::with_animator(geometry, RingAnimator::new(), defaults::ANIMATION_MS)
    }
}

impl<C: Clock> ProgressRing<C> {
    pub fn with_animator(
        geometry: RingGeometry,
        animator: RingAnimator<C>,
        duration_ms: u64,
    ) -> Self {
        Self {
            geometry,
            animator,
            duration_ms,
            summary: DoseSummary::default(),
        }
    }

    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    pub fn summary(&self) -> DoseSummary {
        self.summary
    }

    /// Feed the latest summary. Starts an animation only when the ratio moved.
    pub fn update(&mut self, summary: DoseSummary) -> Option<AnimationId> {
        self.summary = summary;
        let target = summary.ratio();
        if (target - self.animator.target_ratio()).abs() < f64::EPSILON {
            return None;
        }
        debug!(
            "Progress ring animating to {:.2} ({} of {})",
            target, summary.completed, summary.total
        );
        Some(self.animator.animate_to(target, self.duration_ms))
    }

    /// Advance the animation and return this frame's geometry.
    pub fn frame(&mut self) -> ArcGeometry {
        self.animator.tick();
        self.current()
    }

    /// Geometry for the last computed value, without advancing time.
    pub fn current(&self) -> ArcGeometry {
        self.animator.render(&self.geometry)
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn is_current(&self, id: AnimationId) -> bool {
        self.animator.is_current(id)
    }

    pub fn unmount(&mut self) {
        self.animator.unmount();
    }
}
