// File: crates/pyramid-core/src/axis.rs
// Summary: Axis layouts: percentage axes at the bottom, mirrored category axes at the gap.

use crate::layout::Frame;
use crate::scale::{BandScale, LinearScale};

/// Tick mark length on the percentage axes, in pixels.
pub const TICK_LEN: f64 = 6.0;

/// One tick: offset along the axis (local to its origin) plus a label,
/// which may be empty for structural-only axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub offset: f64,
    pub label: String,
}

/// Horizontal whole-percent axis along the chart's bottom edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PercentAxis {
    /// Translation of the axis group within the inner frame.
    pub origin: (f64, f64),
    /// Domain line endpoints (local x, low to high).
    pub line: (f64, f64),
    pub ticks: Vec<Tick>,
}

/// Vertical category axis at one of the two zero lines. Ticks have zero
/// length; labels (when present) sit `label_pad` into the mid gap,
/// center-anchored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryAxis {
    pub origin: (f64, f64),
    /// Domain line length (the chart height).
    pub line_len: f64,
    pub label_pad: f64,
    pub ticks: Vec<Tick>,
}

/// The four axis layouts, recomputed wholesale every pipeline pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisSet {
    pub percent_left: PercentAxis,
    pub percent_right: PercentAxis,
    pub category_left: CategoryAxis,
    pub category_right: CategoryAxis,
}

impl AxisSet {
    /// `side` is the generic side scale over `[0, max_share] -> [0, side_w]`;
    /// the left percent axis reuses it over a reversed range so zero sits at
    /// the centerline.
    pub fn compute(frame: &Frame, side: &LinearScale, band: &BandScale, mid_gap: f64) -> Self {
        let values = nice_ticks(side.domain[1], tick_count(frame.side_w));

        let left_scale = side.copy_with_range([frame.left_zero_x, 0.0]);
        let percent_left = percent_axis((0.0, frame.chart_h), &left_scale, &values);
        let percent_right = percent_axis((frame.right_zero_x, frame.chart_h), side, &values);

        let category_left = category_axis((frame.left_zero_x, 0.0), frame, band, mid_gap, true);
        let category_right = category_axis((frame.right_zero_x, 0.0), frame, band, 0.0, false);

        Self { percent_left, percent_right, category_left, category_right }
    }
}

fn percent_axis(origin: (f64, f64), scale: &LinearScale, values: &[f64]) -> PercentAxis {
    let (r0, r1) = (scale.range[0], scale.range[1]);
    let ticks = values
        .iter()
        .map(|&v| Tick { offset: scale.scale(v), label: format_percent(v) })
        .collect();
    PercentAxis { origin, line: (r0.min(r1), r0.max(r1)), ticks }
}

fn category_axis(
    origin: (f64, f64),
    frame: &Frame,
    band: &BandScale,
    label_pad: f64,
    labeled: bool,
) -> CategoryAxis {
    let half_band = band.bandwidth() / 2.0;
    let ticks = band
        .keys()
        .iter()
        .map(|key| Tick {
            offset: band.position(key).unwrap_or(0.0) + half_band,
            label: if labeled { key.clone() } else { String::new() },
        })
        .collect();
    CategoryAxis { origin, line_len: frame.chart_h, label_pad, ticks }
}

/// Whole-percent label, e.g. 0.25 -> "25%".
pub fn format_percent(v: f64) -> String {
    format!("{}%", (v * 100.0).round() as i64)
}

/// Tick values over `[0, max]` on a 1/2/5 decade step. Always includes 0;
/// never exceeds `max`.
pub fn nice_ticks(max: f64, target: usize) -> Vec<f64> {
    if !(max > 0.0) {
        return vec![0.0];
    }
    let target = target.max(2);
    let raw = max / (target - 1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let factor = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = factor * mag;

    let mut ticks = Vec::new();
    let mut i = 0u32;
    loop {
        let v = step * f64::from(i);
        if v > max * (1.0 + 1e-9) {
            break;
        }
        ticks.push(v);
        i += 1;
    }
    ticks
}

fn tick_count(side_w: f64) -> usize {
    ((side_w / 60.0).round().max(0.0) as usize).clamp(2, 10)
}
