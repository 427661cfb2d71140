//! Configuration settings for the toroidal Game of Life

use crate::game_of_life::StateFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub playback: PlaybackConfig,
    pub display: DisplayConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
    pub randomized: bool,
    /// Fixed seed for reproducible random grids
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    pub tick_millis: u64,
    /// Stop automatically after this many generations
    #[serde(default)]
    pub max_generations: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Edge length of one cell on a pixel canvas
    pub cell_pixels: usize,
    pub style: DisplayStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    Compact,
    Coordinates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: StateFormat,
    pub path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                columns: 100,
                rows: 100,
                randomized: true,
                seed: None,
            },
            playback: PlaybackConfig {
                tick_millis: 10,
                max_generations: None,
            },
            display: DisplayConfig {
                cell_pixels: 5,
                style: DisplayStyle::Compact,
            },
            output: OutputConfig {
                format: StateFormat::Json,
                path: PathBuf::from("saved_board.json"),
            },
        }
    }
}

impl PlaybackConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.columns == 0 || self.grid.rows == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.columns,
                self.grid.rows
            );
        }

        if self.display.cell_pixels == 0 {
            anyhow::bail!("Cell size in pixels must be positive");
        }

        if self.playback.max_generations == Some(0) {
            anyhow::bail!("Maximum generations must be positive when set");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(columns) = cli_overrides.columns {
            self.grid.columns = columns;
        }
        if let Some(rows) = cli_overrides.rows {
            self.grid.rows = rows;
        }
        if cli_overrides.empty {
            self.grid.randomized = false;
        }
        if let Some(seed) = cli_overrides.seed {
            self.grid.seed = Some(seed);
        }
        if let Some(tick_millis) = cli_overrides.tick_millis {
            self.playback.tick_millis = tick_millis;
        }
        if let Some(generations) = cli_overrides.generations {
            self.playback.max_generations = Some(generations);
        }
        if let Some(ref output) = cli_overrides.output {
            self.output.path = output.clone();
            self.output.format = StateFormat::from_path(output);
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub columns: Option<usize>,
    pub rows: Option<usize>,
    pub empty: bool,
    pub seed: Option<u64>,
    pub tick_millis: Option<u64>,
    pub generations: Option<usize>,
    pub output: Option<PathBuf>,
    pub format: Option<StateFormat>,
}
