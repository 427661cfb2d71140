//! Game of Life transition rule

use super::Grid;
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Compute the next generation of `current` without touching it.
    ///
    /// Every cell reads its neighbors from `current`, and the result is
    /// assembled in a separate buffer.
    pub fn evolve(current: &Grid) -> Grid {
        let columns = current.columns();

        let next_cells: Vec<bool> = (0..current.rows())
            .into_par_iter()
            .flat_map_iter(move |row| {
                (0..columns).map(move |column| {
                    let neighbors = current.neighbors_of(column, row);
                    Self::next_state(current.cell(column, row), neighbors)
                })
            })
            .collect();

        Grid::from_parts(columns, current.rows(), next_cells)
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = Self::evolve(&grid);
        }
        grid
    }

    /// State of a cell in the next generation given its current state and live neighbor count.
    ///
    /// Two neighbors keep whatever state the cell already has. This only holds
    /// for B3/S23; other rule variants need separate birth and survival arms.
    pub fn next_state(current_state: bool, neighbor_count: u8) -> bool {
        match neighbor_count {
            3 => true,
            2 => current_state,
            _ => false,
        }
    }
}
