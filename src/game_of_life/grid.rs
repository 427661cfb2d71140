//! Grid representation and per-cell operations for the toroidal Game of Life

use super::GameOfLifeRules;
use crate::error::{LifeError, Result};
use itertools::iproduct;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A `(column, row)` position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub column: usize,
    pub row: usize,
}

impl Coord {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((column, row): (usize, usize)) -> Self {
        Self::new(column, row)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

impl FromStr for Coord {
    type Err = LifeError;

    /// Accepts `3,4`, `3, 4` and `(3, 4)`
    fn from_str(s: &str) -> Result<Self> {
        parse_pair(s).map(Coord::from)
    }
}

/// Parse an unsigned integer pair, optionally wrapped in parentheses
pub(crate) fn parse_pair(s: &str) -> Result<(usize, usize)> {
    let trimmed = s.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    let (first, second) = inner
        .split_once(',')
        .ok_or_else(|| LifeError::Serialization(format!("Expected a pair like \"3,4\", got \"{}\"", s)))?;

    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| LifeError::Serialization(format!("Invalid coordinate \"{}\" in \"{}\": {}", part.trim(), s, e)))
    };

    Ok((parse(first)?, parse(second)?))
}

/// A dense toroidal Game of Life grid
///
/// Cells are stored row-major in a flat vector of exactly `columns * rows`
/// entries, so every coordinate inside the bounds always has a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(columns: usize, rows: usize) -> Result<Self> {
        let count = checked_cell_count(columns, rows)?;
        Ok(Self {
            columns,
            rows,
            cells: vec![false; count],
        })
    }

    /// Create a grid where each cell is independently alive with probability 0.5
    pub fn random<R: Rng + ?Sized>(columns: usize, rows: usize, rng: &mut R) -> Result<Self> {
        let count = checked_cell_count(columns, rows)?;
        let cells = (0..count).map(|_| rng.gen_bool(0.5)).collect();
        Ok(Self { columns, rows, cells })
    }

    /// Create a reproducible random grid from a seed
    pub fn seeded(columns: usize, rows: usize, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random(columns, rows, &mut rng)
    }

    /// Construct either an all-dead or a randomized grid.
    /// Without a seed the random source is drawn from OS entropy.
    pub fn construct(columns: usize, rows: usize, randomized: bool, seed: Option<u64>) -> Result<Self> {
        let grid = match (randomized, seed) {
            (false, _) => Self::new(columns, rows)?,
            (true, Some(seed)) => Self::seeded(columns, rows, seed)?,
            (true, None) => Self::random(columns, rows, &mut ChaCha8Rng::from_entropy())?,
        };
        debug!(columns, rows, randomized, ?seed, living = grid.living_count(), "constructed grid");
        Ok(grid)
    }

    /// Create a grid from rows of cells (outer index is the row)
    pub fn from_rows(cells: Vec<Vec<bool>>) -> Result<Self> {
        let rows = cells.len();
        let columns = cells.first().map_or(0, Vec::len);
        checked_cell_count(columns, rows)?;

        for (i, row) in cells.iter().enumerate() {
            if row.len() != columns {
                return Err(LifeError::Serialization(format!(
                    "Row {} has length {}, expected {}",
                    i,
                    row.len(),
                    columns
                )));
            }
        }

        Ok(Self {
            columns,
            rows,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Assemble a grid from an already validated flat buffer
    pub(crate) fn from_parts(columns: usize, rows: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), columns * rows);
        Self { columns, rows, cells }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells, `columns * rows`
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.column < self.columns && coord.row < self.rows
    }

    #[inline]
    fn index(&self, coord: Coord) -> Result<usize> {
        if !self.contains(coord) {
            return Err(LifeError::UnknownCoordinate {
                column: coord.column,
                row: coord.row,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(coord.row * self.columns + coord.column)
    }

    /// State of an in-bounds cell, no checks
    #[inline]
    pub(crate) fn cell(&self, column: usize, row: usize) -> bool {
        self.cells[row * self.columns + column]
    }

    pub fn get(&self, coord: Coord) -> Result<bool> {
        Ok(self.cells[self.index(coord)?])
    }

    pub fn set(&mut self, coord: Coord, alive: bool) -> Result<()> {
        let idx = self.index(coord)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Flip a single cell and return its new state
    pub fn toggle(&mut self, coord: Coord) -> Result<bool> {
        let idx = self.index(coord)?;
        self.cells[idx] = !self.cells[idx];
        debug!(%coord, alive = self.cells[idx], "toggled cell");
        Ok(self.cells[idx])
    }

    /// Count the living cells in the Moore neighborhood of `coord`, wrapping at the edges
    pub fn count_alive_neighbors(&self, coord: Coord) -> Result<u8> {
        self.index(coord)?;
        Ok(self.neighbors_of(coord.column, coord.row))
    }

    /// Each of the eight offsets is wrapped on its own, so on grids narrower
    /// than three cells the same neighbor can be counted more than once.
    pub(crate) fn neighbors_of(&self, column: usize, row: usize) -> u8 {
        iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&offset| offset != (0, 0))
            .filter(|&(dc, dr)| {
                let c = wrap(column, dc, self.columns);
                let r = wrap(row, dr, self.rows);
                self.cell(c, r)
            })
            .count() as u8
    }

    /// Replace the current generation with the next one
    pub fn advance(&mut self) {
        let next = GameOfLifeRules::evolve(self);
        self.cells = next.cells;
        debug!(living = self.living_count(), "advanced one generation");
    }

    /// Advance `generations` times, each step built on the previous result
    pub fn advance_by(&mut self, generations: usize) {
        for _ in 0..generations {
            self.advance();
        }
    }

    /// Kill every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells = vec![false; self.cells.len()];
        debug!(columns = self.columns, rows = self.rows, "cleared grid");
    }

    /// Every coordinate of the grid in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        iproduct!(0..self.rows, 0..self.columns).map(|(row, column)| Coord::new(column, row))
    }

    /// Every coordinate paired with its state
    pub fn iter(&self) -> impl Iterator<Item = (Coord, bool)> + '_ {
        self.coords().zip(self.cells.iter().copied())
    }

    /// Coordinates of all living cells
    pub fn living_cells(&self) -> Vec<Coord> {
        self.iter()
            .filter_map(|(coord, alive)| alive.then_some(coord))
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// True when no cell is alive
    pub fn is_extinct(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }
}

/// Number of cells in a `columns x rows` grid, rejecting zero and overflowing sizes
pub(crate) fn checked_cell_count(columns: usize, rows: usize) -> Result<usize> {
    columns
        .checked_mul(rows)
        .filter(|&count| count > 0)
        .ok_or(LifeError::InvalidDimension { columns, rows })
}

#[inline]
fn wrap(value: usize, delta: isize, size: usize) -> usize {
    (value as isize + delta).rem_euclid(size as isize) as usize
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let symbol = if self.cell(column, row) { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cell_count(), 12);
        assert!(grid.is_extinct());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(LifeError::InvalidDimension { columns: 0, rows: 5 })
        ));
        assert!(matches!(
            Grid::seeded(5, 0, 1),
            Err(LifeError::InvalidDimension { .. })
        ));
        assert!(Grid::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_overflowing_dimensions() {
        assert!(matches!(
            Grid::new(1 << 33, 1 << 33),
            Err(LifeError::InvalidDimension { .. })
        ));
        assert!(matches!(
            Grid::seeded(usize::MAX, 2, 1),
            Err(LifeError::InvalidDimension { .. })
        ));
        assert!(matches!(
            Grid::construct(usize::MAX, usize::MAX, false, None),
            Err(LifeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(vec![
            vec![true, false, true],
            vec![false, true, false],
        ])
        .unwrap();
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 2);
        assert!(grid.get(Coord::new(2, 0)).unwrap());
        assert!(grid.get(Coord::new(1, 1)).unwrap());
        assert!(!grid.get(Coord::new(0, 1)).unwrap());

        let ragged = Grid::from_rows(vec![vec![true, false], vec![true]]);
        assert!(matches!(ragged, Err(LifeError::Serialization(_))));
    }

    #[test]
    fn test_center_of_three_by_three_counts_corner_once() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(Coord::new(0, 0), true).unwrap();
        assert_eq!(grid.count_alive_neighbors(Coord::new(1, 1)).unwrap(), 1);
    }

    #[test]
    fn test_neighbors_wrap_across_corners() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set(Coord::new(4, 4), true).unwrap();
        assert_eq!(grid.count_alive_neighbors(Coord::new(0, 0)).unwrap(), 1);
        assert_eq!(grid.count_alive_neighbors(Coord::new(4, 0)).unwrap(), 1);
        assert_eq!(grid.count_alive_neighbors(Coord::new(2, 2)).unwrap(), 0);
    }

    #[test]
    fn test_neighbor_counting() {
        let grid = Grid::from_rows(vec![
            vec![false, false, false, false, false],
            vec![false, true, true, true, false],
            vec![false, true, false, true, false],
            vec![false, true, true, true, false],
            vec![false, false, false, false, false],
        ])
        .unwrap();

        assert_eq!(grid.count_alive_neighbors(Coord::new(2, 2)).unwrap(), 8);
        assert_eq!(grid.count_alive_neighbors(Coord::new(0, 0)).unwrap(), 1);
        assert_eq!(grid.count_alive_neighbors(Coord::new(1, 1)).unwrap(), 2);
    }

    #[test]
    fn test_degenerate_wrap_counts_each_offset() {
        let grid = Grid::from_rows(vec![vec![true, false], vec![false, true]]).unwrap();
        // All four diagonal offsets of (0, 0) land on (1, 1)
        assert_eq!(grid.count_alive_neighbors(Coord::new(0, 0)).unwrap(), 4);
    }

    #[test]
    fn test_unknown_coordinate() {
        let mut grid = Grid::new(4, 4).unwrap();
        assert!(matches!(
            grid.toggle(Coord::new(4, 0)),
            Err(LifeError::UnknownCoordinate { column: 4, row: 0, .. })
        ));
        assert!(grid.count_alive_neighbors(Coord::new(0, 9)).is_err());
        assert!(grid.get(Coord::new(10, 10)).is_err());
    }

    #[test]
    fn test_toggle() {
        let mut grid = Grid::new(4, 4).unwrap();
        assert!(grid.toggle(Coord::new(1, 2)).unwrap());
        assert_eq!(grid.living_cells(), vec![Coord::new(1, 2)]);
        assert!(!grid.toggle(Coord::new(1, 2)).unwrap());
        assert!(grid.is_extinct());
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::seeded(10, 8, 7).unwrap();
        assert!(!grid.is_extinct());
        grid.clear();
        assert!(grid.living_cells().is_empty());
        assert_eq!(grid.cell_count(), 80);
        assert_eq!((grid.columns(), grid.rows()), (10, 8));
    }

    #[test]
    fn test_seeded_grids_are_reproducible() {
        let first = Grid::seeded(20, 20, 42).unwrap();
        let second = Grid::seeded(20, 20, 42).unwrap();
        assert_eq!(first, second);

        let dense = Grid::seeded(100, 100, 42).unwrap();
        let living = dense.living_count();
        assert!((4000..6000).contains(&living), "unexpected density: {}", living);
    }

    #[test]
    fn test_construct() {
        assert!(Grid::construct(6, 6, false, Some(3)).unwrap().is_extinct());
        assert_eq!(
            Grid::construct(6, 6, true, Some(3)).unwrap(),
            Grid::seeded(6, 6, 3).unwrap()
        );
        assert_eq!(Grid::construct(6, 6, true, None).unwrap().cell_count(), 36);
    }

    #[test]
    fn test_coords_are_row_major() {
        let grid = Grid::new(2, 2).unwrap();
        let coords: Vec<Coord> = grid.coords().collect();
        assert_eq!(
            coords,
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1)]
        );
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!("3,4".parse::<Coord>().unwrap(), Coord::new(3, 4));
        assert_eq!("(3, 4)".parse::<Coord>().unwrap(), Coord::new(3, 4));
        assert!("3".parse::<Coord>().is_err());
        assert!("a,b".parse::<Coord>().is_err());
        assert!("-1,2".parse::<Coord>().is_err());
    }

    proptest! {
        #[test]
        fn prop_double_toggle_restores(
            columns in 1usize..16,
            rows in 1usize..16,
            seed in any::<u64>(),
            column in 0usize..16,
            row in 0usize..16,
        ) {
            let original = Grid::seeded(columns, rows, seed).unwrap();
            let coord = Coord::new(column % columns, row % rows);
            let mut grid = original.clone();
            grid.toggle(coord).unwrap();
            grid.toggle(coord).unwrap();
            prop_assert_eq!(grid, original);
        }

        #[test]
        fn prop_grid_stays_dense(
            columns in 1usize..16,
            rows in 1usize..16,
            seed in any::<u64>(),
            generations in 0usize..4,
        ) {
            let mut grid = Grid::seeded(columns, rows, seed).unwrap();
            grid.advance_by(generations);
            prop_assert_eq!(grid.cell_count(), columns * rows);
            prop_assert_eq!(grid.coords().count(), columns * rows);
            prop_assert!(grid.coords().all(|coord| grid.get(coord).is_ok()));
            grid.clear();
            prop_assert_eq!(grid.cell_count(), columns * rows);
        }
    }
}
