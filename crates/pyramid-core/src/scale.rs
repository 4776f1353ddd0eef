// File: crates/pyramid-core/src/scale.rs
// Summary: Linear (share -> px) and band (category -> px) scales.

/// Linear scale mapping a share domain onto a pixel range. The range may be
/// reversed (r0 > r1), which is how the left percentage axis reads outward
/// from the centerline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
    pub round: bool,
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range, round: false }
    }

    /// Like `new`, but scaled outputs are rounded to whole pixels.
    pub fn range_round(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range, round: true }
    }

    /// Same domain and rounding over a different range.
    pub fn copy_with_range(&self, range: [f64; 2]) -> Self {
        Self { domain: self.domain, range, round: self.round }
    }

    pub fn scale(&self, v: f64) -> f64 {
        let span = self.domain[1] - self.domain[0];
        let t = if span.abs() < f64::EPSILON { 0.0 } else { (v - self.domain[0]) / span };
        let out = self.range[0] + t * (self.range[1] - self.range[0]);
        if self.round { out.round() } else { out }
    }
}

/// Band scale over an ordered set of category keys with uniform padding.
/// A reversed range (r0 > r1) assigns the first key the band nearest r0,
/// i.e. the chart bottom for a `[chart_h, 0]` range.
#[derive(Clone, Debug)]
pub struct BandScale {
    keys: Vec<String>,
    positions: Vec<f64>,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Build a rounded band scale. `padding` sets both inner and outer
    /// padding as a fraction of the step; alignment is centered.
    pub fn range_round(keys: Vec<String>, range: [f64; 2], padding: f64) -> Self {
        let n = keys.len();
        let reverse = range[1] < range[0];
        let (start, stop) = if reverse { (range[1], range[0]) } else { (range[0], range[1]) };

        let n_f = n as f64;
        let step = ((stop - start) / 1f64.max(n_f - padding + padding * 2.0)).floor();
        let start = (start + (stop - start - step * (n_f - padding)) * 0.5).round();
        let bandwidth = (step * (1.0 - padding)).round();

        let mut positions: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
        if reverse {
            positions.reverse();
        }

        Self { keys, positions, step, bandwidth }
    }

    pub fn keys(&self) -> &[String] { &self.keys }

    /// Leading edge of the band for `key`, or None for an unknown key.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.keys.iter().position(|k| k == key).map(|i| self.positions[i])
    }

    pub fn bandwidth(&self) -> f64 { self.bandwidth }

    pub fn step(&self) -> f64 { self.step }
}
