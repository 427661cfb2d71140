//! Presentation helpers

pub mod display;

pub use display::{CanvasMapper, Color, ColorOutput, GridFormatter};
