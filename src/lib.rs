//! Conway's Game of Life on a toroidal grid
//!
//! This library provides the grid engine (construction, neighbor counting with
//! wraparound, generation updates, cell edits and state export), plus a play
//! loop and terminal helpers that any front-end can drive.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod play;
pub mod telemetry;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, Result};
pub use game_of_life::{Coord, Grid, GridSnapshot, Pattern, StateFormat};
pub use play::{PlayHandle, Player, SharedGrid};

/// Build the starting grid described by `settings`
pub fn build_grid(settings: &Settings) -> Result<Grid> {
    Grid::construct(
        settings.grid.columns,
        settings.grid.rows,
        settings.grid.randomized,
        settings.grid.seed,
    )
}
