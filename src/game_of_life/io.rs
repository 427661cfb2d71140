//! Export, import and file I/O for Game of Life grids

use super::grid::{checked_cell_count, parse_pair};
use super::{Coord, Grid};
use crate::error::{LifeError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Complete, structured dump of a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<CellRecord>,
}

/// One `(column, row) -> alive` entry of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub column: usize,
    pub row: usize,
    pub alive: bool,
}

/// On-disk representation of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StateFormat {
    Json,
    Yaml,
    /// `"(column, row)" = "True"`, one record per line
    Legacy,
}

impl StateFormat {
    /// Pick a format from a file extension, falling back to the line format
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("json") => StateFormat::Json,
            Some("yaml") | Some("yml") => StateFormat::Yaml,
            _ => StateFormat::Legacy,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            StateFormat::Json => "json",
            StateFormat::Yaml => "yaml",
            StateFormat::Legacy => "txt",
        }
    }
}

impl Grid {
    /// Dump every cell, row by row
    pub fn export_state(&self) -> GridSnapshot {
        GridSnapshot {
            columns: self.columns(),
            rows: self.rows(),
            cells: self
                .iter()
                .map(|(coord, alive)| CellRecord {
                    column: coord.column,
                    row: coord.row,
                    alive,
                })
                .collect(),
        }
    }

    /// Rebuild a grid from a snapshot, rejecting incomplete or inconsistent data
    pub fn import_state(snapshot: &GridSnapshot) -> Result<Self> {
        let expected = checked_cell_count(snapshot.columns, snapshot.rows)?;
        if snapshot.cells.len() != expected {
            return Err(LifeError::Serialization(format!(
                "Snapshot has {} records but a {}x{} grid needs {}",
                snapshot.cells.len(),
                snapshot.columns,
                snapshot.rows,
                expected
            )));
        }

        let mut grid = Grid::new(snapshot.columns, snapshot.rows)?;
        let mut seen = vec![false; grid.cell_count()];

        for record in &snapshot.cells {
            let coord = Coord::new(record.column, record.row);
            if !grid.contains(coord) {
                return Err(LifeError::Serialization(format!(
                    "Record {} is outside the {}x{} grid",
                    coord, snapshot.columns, snapshot.rows
                )));
            }

            let idx = coord.row * snapshot.columns + coord.column;
            if std::mem::replace(&mut seen[idx], true) {
                return Err(LifeError::Serialization(format!("Duplicate record for {}", coord)));
            }
            grid.set(coord, record.alive)?;
        }

        // Right count, all in range and no duplicates means every cell was set
        Ok(grid)
    }
}

/// Render a grid in the line-oriented `"(column, row)" = "True"` format
pub fn grid_to_legacy(grid: &Grid) -> String {
    let mut output = String::with_capacity(grid.cell_count() * 20);
    for (coord, alive) in grid.iter() {
        let state = if alive { "True" } else { "False" };
        output.push_str(&format!("\"{}\" = \"{}\"\n", coord, state));
    }
    output
}

/// Parse the line-oriented format; dimensions are inferred from the largest coordinates
pub fn parse_legacy(content: &str) -> Result<GridSnapshot> {
    let mut cells = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let malformed = |reason: &str| {
            LifeError::Serialization(format!("Line {}: {} in {:?}", line_no + 1, reason, line))
        };

        let (key, value) = line.split_once('=').ok_or_else(|| malformed("missing '='"))?;
        let key = unquote(key.trim()).ok_or_else(|| malformed("coordinate is not quoted"))?;
        let value = unquote(value.trim()).ok_or_else(|| malformed("state is not quoted"))?;

        let (column, row) = parse_pair(key)?;
        let alive = if value.eq_ignore_ascii_case("true") {
            true
        } else if value.eq_ignore_ascii_case("false") {
            false
        } else {
            return Err(malformed("state must be True or False"));
        };

        cells.push(CellRecord { column, row, alive });
    }

    if cells.is_empty() {
        return Err(LifeError::Serialization("State contains no cell records".to_string()));
    }

    let extent = |largest: usize| {
        largest.checked_add(1).ok_or_else(|| {
            LifeError::Serialization(format!("Coordinate {} is too large for a grid dimension", largest))
        })
    };
    let columns = extent(cells.iter().map(|cell| cell.column).max().unwrap_or(0))?;
    let rows = extent(cells.iter().map(|cell| cell.row).max().unwrap_or(0))?;

    Ok(GridSnapshot { columns, rows, cells })
}

fn unquote(s: &str) -> Option<&str> {
    s.strip_prefix('"').and_then(|rest| rest.strip_suffix('"'))
}

/// Encode a grid in the requested format
pub fn encode_state(grid: &Grid, format: StateFormat) -> Result<String> {
    match format {
        StateFormat::Json => Ok(serde_json::to_string_pretty(&grid.export_state())?),
        StateFormat::Yaml => Ok(serde_yaml::to_string(&grid.export_state())?),
        StateFormat::Legacy => Ok(grid_to_legacy(grid)),
    }
}

/// Decode a grid from the requested format
pub fn decode_state(content: &str, format: StateFormat) -> Result<Grid> {
    let snapshot: GridSnapshot = match format {
        StateFormat::Json => serde_json::from_str(content)?,
        StateFormat::Yaml => serde_yaml::from_str(content)?,
        StateFormat::Legacy => parse_legacy(content)?,
    };
    Grid::import_state(&snapshot)
}

/// Save a grid to a file
pub fn save_state<P: AsRef<Path>>(grid: &Grid, path: P, format: StateFormat) -> Result<()> {
    let path = path.as_ref();
    let content = encode_state(grid, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;

    info!(path = %path.display(), ?format, living = grid.living_count(), "saved grid state");
    Ok(())
}

/// Load a grid from a file
pub fn load_state<P: AsRef<Path>>(path: P, format: StateFormat) -> Result<Grid> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let grid = decode_state(&content, format)?;

    debug!(path = %path.display(), columns = grid.columns(), rows = grid.rows(), "loaded grid state");
    Ok(grid)
}
