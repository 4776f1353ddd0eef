// File: crates/pyramid-core/tests/smoke.rs
// Purpose: End-to-end paint smoke test plus a pixel-level mirroring check.

use std::cell::RefCell;
use std::rc::Rc;

use pyramid_core::{Container, PyramidChart, Row};

fn bound(rows: Vec<Row>) -> (Rc<RefCell<PyramidChart>>, Rc<Container>) {
    let container = Container::new(696.0, 500.0);
    let chart = Rc::new(RefCell::new(PyramidChart::new()));
    PyramidChart::bind(&chart, &container, rows);
    (chart, container)
}

#[test]
fn render_smoke_png() {
    let (chart, _container) = bound(vec![
        Row::new("18-19", 4.0, 12.0),
        Row::new("20-24", 10.0, 8.0),
        Row::new("25-29", 7.0, 9.0),
    ]);
    chart.borrow_mut().settle();

    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    chart.borrow().render_to_png(&out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify the in-memory API works.
    let bytes = chart.borrow().render_to_png_bytes().expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    // A data update keeps the instance paintable.
    chart
        .borrow_mut()
        .update(vec![Row::new("18-19", 5.0, 5.0), Row::new("30-34", 5.0, 5.0)]);
    chart.borrow_mut().settle();
    chart.borrow().render_to_png_bytes().expect("render after update");
}

#[test]
fn mirrored_bars_extend_opposite_from_the_zero_lines() {
    let (chart, _container) = bound(vec![Row::new("a", 2.0, 4.0), Row::new("b", 8.0, 16.0)]);
    {
        let mut c = chart.borrow_mut();
        c.draw_labels = false;
        c.settle();
    }

    let c = chart.borrow();
    let f = c.frame();
    let (ox, oy) = f.origin;
    let band = c.band_scale();
    let y = (oy + band.position("a").expect("band") + band.bandwidth() / 2.0) as usize;

    let (px, w, _h, stride) = c.render_to_rgba8().expect("paint");
    let pixel = |x: usize, y: usize| -> (u8, u8, u8) {
        let i = y * stride + x * 4;
        (px[i], px[i + 1], px[i + 2])
    };
    assert!((w as f64) >= f.width);

    let theme = c.theme();
    let left = (theme.bar_left.r(), theme.bar_left.g(), theme.bar_left.b());
    let right = (theme.bar_right.r(), theme.bar_right.g(), theme.bar_right.b());
    let background = (
        theme.background.r(),
        theme.background.g(),
        theme.background.b(),
    );

    // "a" holds 0.2 of each total against a 0.8 maximum: 75px per side.
    let x_left = (ox + f.left_zero_x - 10.0) as usize;
    let x_right = (ox + f.right_zero_x + 10.0) as usize;
    let x_gap = (ox + f.left_zero_x + 5.0) as usize;

    assert_eq!(pixel(x_left, y), left, "left bar grows leftward from its zero line");
    assert_eq!(pixel(x_right, y), right, "right bar grows rightward from its zero line");
    assert_eq!(pixel(x_gap, y), background, "the mid gap stays clear of bars");
}
