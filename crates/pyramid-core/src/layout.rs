// File: crates/pyramid-core/src/layout.rs
// Summary: Container measurement to chart geometry (split point, side widths).

use crate::types::{Margins, PyramidConfig};

/// Geometry derived from one container measurement. Recomputed on every
/// pipeline pass, never patched incrementally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Outer (container) size in pixels.
    pub width: f64,
    pub height: f64,
    /// Inner frame offset: top-left margin corner.
    pub origin: (f64, f64),
    /// Inner drawable size, margins removed.
    pub chart_w: f64,
    pub chart_h: f64,
    /// Width available to each mirrored side. May go negative for an
    /// undersized container; downstream arithmetic proceeds regardless.
    pub side_w: f64,
    /// Where zero sits on the left side's x-axis (the mid-gap boundary).
    pub left_zero_x: f64,
    /// Mirror point for the right side.
    pub right_zero_x: f64,
}

impl Frame {
    pub fn compute(size: (f64, f64), config: &PyramidConfig) -> Self {
        let (width, height) = size;
        let Margins { top, right, bottom, left } = config.margins;

        let chart_w = width - left - right;
        let chart_h = height - top - bottom;
        let side_w = chart_w / 2.0 - config.mid_gap;

        Self {
            width,
            height,
            origin: (left, top),
            chart_w,
            chart_h,
            side_w,
            left_zero_x: side_w,
            right_zero_x: chart_w - side_w,
        }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            origin: (0.0, 0.0),
            chart_w: 0.0,
            chart_h: 0.0,
            side_w: 0.0,
            left_zero_x: 0.0,
            right_zero_x: 0.0,
        }
    }
}
