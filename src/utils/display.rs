//! Terminal rendering and canvas mapping for grids

use crate::config::DisplayStyle;
use crate::error::{LifeError, Result};
use crate::game_of_life::{Coord, Grid};

/// Format grids for console output
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid using the configured style
    pub fn format(grid: &Grid, style: DisplayStyle) -> String {
        match style {
            DisplayStyle::Compact => Self::format_grid_compact(grid),
            DisplayStyle::Coordinates => Self::format_grid_with_coords(grid),
        }
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.cell_count() + grid.rows());
        for (coord, alive) in grid.iter() {
            output.push(if alive { '█' } else { '·' });
            if coord.column + 1 == grid.columns() {
                output.push('\n');
            }
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for column in 0..grid.columns() {
            output.push_str(&format!("{:2}", column % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (coord, alive) in grid.iter() {
            if coord.column == 0 {
                output.push_str(&format!("{:2} ", coord.row));
            }
            output.push_str(if alive { "██" } else { "··" });
            if coord.column + 1 == grid.columns() {
                output.push('\n');
            }
        }

        output
    }

    /// One-line population summary
    pub fn format_stats(grid: &Grid, generation: usize) -> String {
        let living = grid.living_count();
        format!(
            "Generation {} | {}x{} | Living: {} | Density: {:.1}%",
            generation,
            grid.columns(),
            grid.rows(),
            living,
            living as f64 / grid.cell_count() as f64 * 100.0
        )
    }
}

/// Maps between pixel positions on a canvas and grid coordinates
#[derive(Debug, Clone, Copy)]
pub struct CanvasMapper {
    cell_pixels: usize,
}

impl CanvasMapper {
    pub fn new(cell_pixels: usize) -> Self {
        Self {
            cell_pixels: cell_pixels.max(1),
        }
    }

    /// Canvas `(width, height)` needed to draw the whole grid
    pub fn canvas_size(&self, grid: &Grid) -> (usize, usize) {
        (grid.columns() * self.cell_pixels, grid.rows() * self.cell_pixels)
    }

    /// Grid cell under a pixel, `UnknownCoordinate` when the click falls outside the grid
    pub fn cell_at(&self, grid: &Grid, x: usize, y: usize) -> Result<Coord> {
        let coord = Coord::new(x / self.cell_pixels, y / self.cell_pixels);
        if !grid.contains(coord) {
            return Err(LifeError::UnknownCoordinate {
                column: coord.column,
                row: coord.row,
                columns: grid.columns(),
                rows: grid.rows(),
            });
        }
        Ok(coord)
    }

    /// Top-left pixel of a cell
    pub fn cell_origin(&self, coord: Coord) -> (usize, usize) {
        (coord.column * self.cell_pixels, coord.row * self.cell_pixels)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
