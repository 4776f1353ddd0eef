// File: crates/demo/src/main.rs
// Summary: Demo loads age-band JSON, renders the pyramid to PNG, then resizes and renders again.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use pyramid_core::{Container, PyramidChart, Row};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let raw = args.next().unwrap_or_else(|| "data/ages.json".to_string());
    let left_key = args.next().unwrap_or_else(|| "uk".to_string());
    let right_key = args.next().unwrap_or_else(|| "mps".to_string());

    let path = resolve_path(&raw)?;
    println!("Using input file: {}", path.display());

    let text =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let slices: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    let rows = assemble_rows(&slices, &left_key, &right_key)?;
    println!("Loaded {} bands for '{}' vs '{}'", rows.len(), left_key, right_key);

    let container = Container::new(960.0, 500.0);
    let chart = Rc::new(RefCell::new(PyramidChart::new()));
    PyramidChart::bind(&chart, &container, rows);
    chart.borrow_mut().settle();

    let out = PathBuf::from("target/out/pyramid.png");
    chart.borrow().render_to_png(&out)?;
    println!("Wrote {}", out.display());

    // A viewport resize re-runs the whole pipeline through the subscription.
    container.set_size(720.0, 420.0);
    chart.borrow_mut().settle();
    let out_small = PathBuf::from("target/out/pyramid_resized.png");
    chart.borrow().render_to_png(&out_small)?;
    println!("Wrote {}", out_small.display());

    Ok(())
}

/// Resolve the data path, falling back to the crate-local copy when run
/// from the workspace root.
fn resolve_path(raw: &str) -> Result<PathBuf> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok(p.to_path_buf());
    }
    let local = Path::new(env!("CARGO_MANIFEST_DIR")).join(raw);
    if local.exists() {
        return Ok(local);
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Build rows from two named slices. The left slice's bands are
/// authoritative; a band missing on the right counts as zero.
fn assemble_rows(slices: &serde_json::Value, left: &str, right: &str) -> Result<Vec<Row>> {
    let left_bands = slices
        .get(left)
        .and_then(|v| v.as_object())
        .with_context(|| format!("slice '{left}' missing from data"))?;
    let right_bands = slices
        .get(right)
        .and_then(|v| v.as_object())
        .with_context(|| format!("slice '{right}' missing from data"))?;

    Ok(left_bands
        .iter()
        .map(|(band, count)| {
            Row::new(
                band.clone(),
                count.as_f64().unwrap_or(0.0),
                right_bands.get(band).and_then(|v| v.as_f64()).unwrap_or(0.0),
            )
        })
        .collect())
}
