//! Named seed patterns that can be stamped onto a grid

use super::{Coord, Grid};
use crate::error::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// 2x2 still life
    Block,
    /// Period-2 oscillator, starts horizontal
    Blinker,
    /// Period-2 oscillator made of two diagonal blocks
    Beacon,
    /// Moves one cell diagonally every four generations
    Glider,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [Pattern::Block, Pattern::Blinker, Pattern::Beacon, Pattern::Glider];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Block => "block",
            Pattern::Blinker => "blinker",
            Pattern::Beacon => "beacon",
            Pattern::Glider => "glider",
        }
    }

    /// Living cells as `(column, row)` offsets from the pattern origin
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Pattern::Blinker => &[(0, 0), (1, 0), (2, 0)],
            Pattern::Beacon => &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
            Pattern::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
        }
    }

    /// Bounding box as `(columns, rows)`
    pub fn bounds(self) -> (usize, usize) {
        self.cells()
            .iter()
            .fold((0, 0), |(w, h), &(c, r)| (w.max(c + 1), h.max(r + 1)))
    }

    /// Set the pattern's cells alive with its origin at `origin`.
    /// Cells past an edge wrap to the opposite side; other cells are left alone.
    pub fn stamp(self, grid: &mut Grid, origin: Coord) -> Result<()> {
        grid.get(origin)?;
        for &(dc, dr) in self.cells() {
            let coord = Coord::new(
                (origin.column + dc) % grid.columns(),
                (origin.row + dr) % grid.rows(),
            );
            grid.set(coord, true)?;
        }
        Ok(())
    }

    /// A dead grid just large enough to hold the pattern with `padding` cells on every side
    pub fn on_blank_grid(self, padding: usize) -> Result<Grid> {
        let (w, h) = self.bounds();
        let mut grid = Grid::new(w + 2 * padding, h + 2 * padding)?;
        self.stamp(&mut grid, Coord::new(padding, padding))?;
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;

    #[test]
    fn test_bounds() {
        assert_eq!(Pattern::Block.bounds(), (2, 2));
        assert_eq!(Pattern::Blinker.bounds(), (3, 1));
        assert_eq!(Pattern::Beacon.bounds(), (4, 4));
        assert_eq!(Pattern::Glider.bounds(), (3, 3));
    }

    #[test]
    fn test_on_blank_grid() {
        let glider = Pattern::Glider.on_blank_grid(1).unwrap();
        assert_eq!((glider.columns(), glider.rows()), (5, 5));
        assert_eq!(glider.living_count(), 5);
        assert!(glider.get(Coord::new(2, 1)).unwrap());
    }

    #[test]
    fn test_block_is_still() {
        let mut grid = Pattern::Block.on_blank_grid(2).unwrap();
        let before = grid.clone();
        grid.advance();
        assert_eq!(grid, before);
    }

    #[test]
    fn test_beacon_has_period_two() {
        let mut grid = Pattern::Beacon.on_blank_grid(2).unwrap();
        let start = grid.clone();
        grid.advance();
        assert_ne!(grid, start);
        assert_eq!(grid.living_count(), 6);
        grid.advance();
        assert_eq!(grid, start);
    }

    #[test]
    fn test_blinker_has_period_two() {
        let mut grid = Pattern::Blinker.on_blank_grid(2).unwrap();
        let start = grid.clone();
        grid.advance();
        let mut vertical: Vec<Coord> = grid.living_cells();
        vertical.sort();
        assert_eq!(vertical, vec![Coord::new(3, 1), Coord::new(3, 2), Coord::new(3, 3)]);
        grid.advance();
        assert_eq!(grid, start);
    }

    #[test]
    fn test_stamp_wraps_edges() {
        let mut grid = Grid::new(6, 6).unwrap();
        Pattern::Block.stamp(&mut grid, Coord::new(5, 5)).unwrap();
        let mut living = grid.living_cells();
        living.sort();
        assert_eq!(
            living,
            vec![Coord::new(0, 0), Coord::new(0, 5), Coord::new(5, 0), Coord::new(5, 5)]
        );
        // Still a block on the torus
        let before = grid.clone();
        grid.advance();
        assert_eq!(grid, before);
    }

    #[test]
    fn test_stamp_rejects_origin_outside_grid() {
        let mut grid = Grid::new(4, 4).unwrap();
        assert!(matches!(
            Pattern::Glider.stamp(&mut grid, Coord::new(4, 0)),
            Err(LifeError::UnknownCoordinate { .. })
        ));
        assert!(grid.is_extinct());
    }
}
