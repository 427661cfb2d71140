//! Configuration management for the toroidal Game of Life

pub mod settings;

pub use settings::{
    Settings, GridConfig, PlaybackConfig, DisplayConfig, DisplayStyle, OutputConfig, CliOverrides
};
