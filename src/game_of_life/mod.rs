//! Game of Life core functionality

pub mod grid;
pub mod rules;
pub mod io;
pub mod patterns;

pub use grid::{Coord, Grid};
pub use rules::GameOfLifeRules;
pub use io::{load_state, save_state, CellRecord, GridSnapshot, StateFormat};
pub use patterns::Pattern;
