//! Arc geometry for the dose progress ring.

use crate::config::ring as defaults;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI};

/// Clamp a ratio into `[0, 1]`. NaN is treated as empty.
pub fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

/// Fixed dimensions of a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    size: f64,
    stroke_width: f64,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self::new(defaults::SIZE, defaults::TRACK_WIDTH)
    }
}

impl RingGeometry {
    pub fn new(size: f64, stroke_width: f64) -> Self {
        Self { size, stroke_width }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Center of the square drawing area on both axes.
    pub fn center(&self) -> f64 {
        self.size / 2.0
    }

    /// Radius of the stroke's center line, inset so the stroke fits.
    pub fn radius(&self) -> f64 {
        ((self.size - self.stroke_width) / 2.0).max(0.0)
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius()
    }

    /// Stroke parameters for `ratio`. Out-of-range input is clamped.
    pub fn render(&self, ratio: f64) -> ArcGeometry {
        let ratio = clamp_ratio(ratio);
        let circumference = self.circumference();
        ArcGeometry {
            ratio,
            radius: self.radius(),
            circumference,
            dash_array: circumference,
            dash_offset: circumference * (1.0 - ratio),
        }
    }
}

/// Dash parameters that draw `ratio` of a circle.
///
/// The full circumference is one dash; shifting it by `dash_offset` hides
/// the unfinished part. Full offset shows nothing, zero offset the whole ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcGeometry {
    pub ratio: f64,
    pub radius: f64,
    pub circumference: f64,
    pub dash_array: f64,
    pub dash_offset: f64,
}

impl ArcGeometry {
    /// The arc starts at 12 o'clock.
    pub const START_ANGLE: f64 = -FRAC_PI_2;

    /// Length of the drawn part of the arc.
    pub fn visible_length(&self) -> f64 {
        self.circumference - self.dash_offset
    }

    /// End angle of the drawn arc, measured clockwise from `START_ANGLE`.
    pub fn end_angle(&self) -> f64 {
        Self::START_ANGLE + 2.0 * PI * self.ratio
    }
}
