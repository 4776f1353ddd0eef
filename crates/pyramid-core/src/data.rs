// File: crates/pyramid-core/src/data.rs
// Summary: Row data model plus totals and per-side share computation.

/// One category entry: a group key and the two side magnitudes (raw counts).
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub group: String,
    pub left: f64,
    pub right: f64,
}

impl Row {
    pub fn new(group: impl Into<String>, left: f64, right: f64) -> Self {
        Self { group: group.into(), left, right }
    }
}

/// Sum of left and right magnitudes over the dataset.
pub fn totals(rows: &[Row]) -> (f64, f64) {
    rows.iter().fold((0.0, 0.0), |(l, r), row| (l + row.left, r + row.right))
}

/// Value as a proportion of its side's total. A non-positive total yields
/// 0.0 so a degenerate side never injects NaN into the shared domain.
pub fn share(value: f64, total: f64) -> f64 {
    if total > 0.0 { value / total } else { 0.0 }
}

/// Highest share on either side; the single upper bound both side scales
/// use so equal proportions render with equal pixel lengths.
pub fn max_share(rows: &[Row]) -> f64 {
    let (total_left, total_right) = totals(rows);
    rows.iter().fold(0.0f64, |m, row| {
        m.max(share(row.left, total_left)).max(share(row.right, total_right))
    })
}
