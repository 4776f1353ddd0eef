// File: crates/pyramid-core/src/error.rs
// Summary: Paint/export error type. Layout and data degeneracies never error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PyramidError {
    #[error("failed to allocate raster surface ({width}x{height})")]
    Surface { width: i32, height: i32 },

    #[error("PNG encode failed")]
    Encode,

    #[error("pixel readback failed")]
    Readback,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
