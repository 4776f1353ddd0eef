// File: crates/pyramid-core/tests/bars.rs
// Purpose: Keyed reconciliation and mirrored geometry of the bar renderer.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use pyramid_core::bars::reconcile;
use pyramid_core::{BarRect, Container, PyramidChart, Row};

fn rect(w: f64) -> BarRect {
    BarRect { x: 0.0, y: 0.0, w, h: 8.0 }
}

#[test]
fn reconcile_partitions_by_key() {
    let now = Instant::now();
    let mut nodes = Vec::new();

    let first = vec![Row::new("a", 1.0, 1.0), Row::new("b", 2.0, 2.0)];
    let stats = reconcile(&mut nodes, &first, |r| rect(r.left), now, Duration::ZERO);
    assert_eq!((stats.entered, stats.retained, stats.exited), (2, 0, 0));

    let second = vec![Row::new("b", 2.0, 2.0), Row::new("c", 3.0, 3.0)];
    let stats = reconcile(&mut nodes, &second, |r| rect(r.left), now, Duration::ZERO);
    assert_eq!((stats.entered, stats.retained, stats.exited), (1, 1, 1));

    let keys: Vec<&str> = nodes.iter().map(|n| n.key.as_str()).collect();
    assert_eq!(keys, ["b", "c"]);
}

#[test]
fn reordering_retargets_instead_of_churning() {
    let now = Instant::now();
    let mut nodes = Vec::new();

    let first = vec![Row::new("a", 1.0, 1.0), Row::new("b", 2.0, 2.0)];
    reconcile(&mut nodes, &first, |r| rect(r.left), now, Duration::ZERO);

    let reordered = vec![Row::new("b", 2.0, 2.0), Row::new("a", 1.0, 1.0)];
    let stats = reconcile(&mut nodes, &reordered, |r| rect(r.left), now, Duration::ZERO);
    assert_eq!((stats.entered, stats.retained, stats.exited), (0, 2, 0));

    let keys: Vec<&str> = nodes.iter().map(|n| n.key.as_str()).collect();
    assert_eq!(keys, ["b", "a"], "node order follows the dataset order");
}

#[test]
fn retained_nodes_transition_from_prior_geometry() {
    let t0 = Instant::now();
    let mut nodes = Vec::new();
    let rows = vec![Row::new("a", 1.0, 1.0)];

    reconcile(&mut nodes, &rows, |_| rect(10.0), t0, Duration::ZERO);

    let d = Duration::from_millis(100);
    reconcile(&mut nodes, &rows, |_| rect(30.0), t0, d);

    let mid = nodes[0].rect.value_at(t0 + Duration::from_millis(50));
    assert!((mid.w - 20.0).abs() < 1e-9);
    let done = nodes[0].rect.value_at(t0 + d);
    assert_eq!(done.w, 30.0);
}

#[test]
fn update_preserves_bar_identity_across_reorder() {
    let t0 = Instant::now();
    let container = Container::new(640.0, 480.0);
    let chart = Rc::new(RefCell::new(PyramidChart::new()));
    PyramidChart::bind(
        &chart,
        &container,
        vec![Row::new("a", 1.0, 3.0), Row::new("b", 3.0, 1.0)],
    );
    chart.borrow_mut().settle();
    let old: Vec<(String, f64)> = chart
        .borrow()
        .bars_left()
        .iter()
        .map(|b| (b.key.clone(), b.rect.target().y))
        .collect();

    chart
        .borrow_mut()
        .update_at(vec![Row::new("b", 3.0, 1.0), Row::new("a", 1.0, 3.0)], t0);

    let c = chart.borrow();
    assert_eq!(c.bars_left().len(), 2);
    assert_eq!(c.bars_left()[0].key, "b");
    for bar in c.bars_left() {
        let (_, old_y) = old
            .iter()
            .find(|(k, _)| *k == bar.key)
            .expect("every key survives a reorder");
        // At the instant of the update each node still shows its prior
        // position: it is transitioning, not re-entering.
        assert_eq!(bar.rect.value_at(t0).y, *old_y, "{} jumped instead of transitioning", bar.key);
    }
}

#[test]
fn bar_widths_match_side_scale_of_share() {
    let container = Container::new(640.0, 480.0);
    let chart = Rc::new(RefCell::new(PyramidChart::new()));
    PyramidChart::bind(
        &chart,
        &container,
        vec![Row::new("18-19", 4.0, 12.0), Row::new("20-24", 10.0, 8.0)],
    );

    let c = chart.borrow();
    let side = c.side_scale();
    let (tl, tr) = c.totals();
    for (bar, row) in c.bars_left().iter().zip(c.rows()) {
        assert_eq!(bar.rect.target().w, side.scale(row.left / tl));
    }
    for (bar, row) in c.bars_right().iter().zip(c.rows()) {
        assert_eq!(bar.rect.target().w, side.scale(row.right / tr));
    }
}

#[test]
fn example_dataset_bar_widths() {
    // side_w comes out at exactly 300 for a 696px container with default
    // margins and gap; the widths below follow from the shared domain.
    let container = Container::new(696.0, 500.0);
    let chart = Rc::new(RefCell::new(PyramidChart::new()));
    PyramidChart::bind(
        &chart,
        &container,
        vec![Row::new("18-19", 4.0, 12.0), Row::new("20-24", 10.0, 8.0)],
    );

    let c = chart.borrow();
    assert_eq!(c.frame().side_w, 300.0);
    assert_eq!(c.bars_left()[0].rect.target().w, 120.0);
    assert_eq!(c.bars_right()[0].rect.target().w, 252.0);
    assert_eq!(c.bars_left()[1].rect.target().w, 300.0);
    assert_eq!(c.bars_right()[1].rect.target().w, 168.0);
}

#[test]
fn equal_shares_have_equal_mirrored_widths() {
    // Both sides hold the same proportions (0.2 and 0.8 of their totals).
    let container = Container::new(696.0, 500.0);
    let chart = Rc::new(RefCell::new(PyramidChart::new()));
    PyramidChart::bind(
        &chart,
        &container,
        vec![Row::new("a", 2.0, 4.0), Row::new("b", 8.0, 16.0)],
    );

    let c = chart.borrow();
    for (l, r) in c.bars_left().iter().zip(c.bars_right()) {
        assert_eq!(l.rect.target().w, r.rect.target().w);
        assert_eq!(l.rect.target().y, r.rect.target().y);
    }
}
