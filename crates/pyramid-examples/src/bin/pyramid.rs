// File: crates/pyramid-examples/src/bin/pyramid.rs
// Summary: Minimal example that renders a mirrored pyramid chart to PNG.

use std::cell::RefCell;
use std::rc::Rc;

use pyramid_core::{theme, Container, PyramidChart, Row};

fn main() {
    let rows = vec![
        Row::new("18-19", 4.0, 12.0),
        Row::new("20-24", 10.0, 8.0),
        Row::new("25-29", 7.0, 9.0),
        Row::new("30-34", 5.0, 11.0),
    ];

    let container = Container::new(960.0, 500.0);
    let chart = Rc::new(RefCell::new(PyramidChart::new().with_theme(theme::find("light"))));
    PyramidChart::bind(&chart, &container, rows);
    chart.borrow_mut().settle();

    let out = std::path::PathBuf::from("target/out/example_pyramid.png");
    chart.borrow().render_to_png(&out).expect("render to png");
    println!("Wrote {}", out.display());
}
