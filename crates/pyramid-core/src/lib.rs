// File: crates/pyramid-core/src/lib.rs
// Summary: Core library entry point; exports public API for the pyramid chart.

pub mod axis;
pub mod bars;
pub mod chart;
pub mod data;
pub mod error;
pub mod layout;
pub mod resize;
pub mod scale;
pub mod text;
pub mod theme;
pub mod transition;
pub mod types;

pub use axis::AxisSet;
pub use bars::{BarNode, BarRect, ReconcileStats};
pub use chart::PyramidChart;
pub use data::{max_share, share, totals, Row};
pub use error::PyramidError;
pub use layout::Frame;
pub use resize::{Container, Subscription};
pub use scale::{BandScale, LinearScale};
pub use text::TextShaper;
pub use theme::Theme;
pub use transition::Animated;
pub use types::{Margins, PyramidConfig, DEFAULT_MID_GAP};
