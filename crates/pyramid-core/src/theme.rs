// File: crates/pyramid-core/src/theme.rs
// Summary: Light/Dark theming for chart painting colors.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub axis_line: skia::Color,
    pub tick: skia::Color,
    pub axis_label: skia::Color,
    pub bar_left: skia::Color,
    pub bar_right: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            bar_left: skia::Color::from_argb(255, 64, 160, 255),
            bar_right: skia::Color::from_argb(255, 240, 150, 60),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            bar_left: skia::Color::from_argb(255, 32, 120, 200),
            bar_right: skia::Color::from_argb(255, 210, 110, 30),
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() {
        if t.name.eq_ignore_ascii_case(name) {
            return t;
        }
    }
    Theme::dark()
}
