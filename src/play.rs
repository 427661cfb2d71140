//! Driving loop for continuous play
//!
//! A front-end shares the grid with the [`Player`] through [`SharedGrid`]. Every
//! engine call happens under the same lock, so a click toggling a cell can never
//! see a generation that is only partly written. Stopping is cooperative: the
//! flag is checked before each step, never in the middle of one.

use crate::error::Result;
use crate::game_of_life::{Coord, Grid};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

pub type SharedGrid = Arc<Mutex<Grid>>;

/// Cloneable switch for starting and stopping a [`Player`] from anywhere
#[derive(Debug, Clone, Default)]
pub struct PlayHandle {
    playing: Arc<AtomicBool>,
}

impl PlayHandle {
    pub fn play(&self) {
        self.playing.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}

pub struct Player {
    grid: SharedGrid,
    handle: PlayHandle,
    tick: Duration,
}

impl Player {
    pub fn new(grid: Grid, tick: Duration) -> Self {
        Self::from_shared(Arc::new(Mutex::new(grid)), tick)
    }

    pub fn from_shared(grid: SharedGrid, tick: Duration) -> Self {
        Self {
            grid,
            handle: PlayHandle::default(),
            tick,
        }
    }

    pub fn grid(&self) -> SharedGrid {
        Arc::clone(&self.grid)
    }

    pub fn handle(&self) -> PlayHandle {
        self.handle.clone()
    }

    pub fn play(&self) {
        self.handle.play();
    }

    pub fn stop(&self) {
        self.handle.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.handle.is_playing()
    }

    /// Advance exactly one generation
    pub fn step(&self) {
        self.grid.lock().advance();
    }

    pub fn toggle(&self, coord: Coord) -> Result<bool> {
        self.grid.lock().toggle(coord)
    }

    pub fn clear(&self) {
        self.grid.lock().clear();
    }

    /// Clone the current generation
    pub fn snapshot(&self) -> Grid {
        self.grid.lock().clone()
    }

    /// Keep advancing while playing, handing each committed generation to `on_frame`.
    ///
    /// The lock is released and the loop sleeps for one tick between steps.
    /// Returns the number of generations advanced; reaching `limit` clears the
    /// playing flag.
    pub fn run<F>(&self, limit: Option<usize>, mut on_frame: F) -> usize
    where
        F: FnMut(&Grid),
    {
        let mut generations = 0;
        info!(?limit, tick_ms = self.tick.as_millis() as u64, "play loop started");

        while self.handle.is_playing() {
            if limit.is_some_and(|max| generations >= max) {
                self.handle.stop();
                break;
            }

            {
                let mut grid = self.grid.lock();
                grid.advance();
                generations += 1;
                on_frame(&grid);
            }

            if !self.tick.is_zero() {
                thread::sleep(self.tick);
            }
        }

        debug!(generations, "play loop stopped");
        generations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Pattern;

    fn blinker_player() -> Player {
        Player::new(Pattern::Blinker.on_blank_grid(2).unwrap(), Duration::ZERO)
    }

    #[test]
    fn test_run_requires_play() {
        let player = blinker_player();
        assert_eq!(player.run(Some(10), |_| {}), 0);
    }

    #[test]
    fn test_run_with_limit() {
        let player = blinker_player();
        let start = player.snapshot();

        player.play();
        let mut frames = Vec::new();
        let generations = player.run(Some(4), |grid| frames.push(grid.living_count()));

        assert_eq!(generations, 4);
        assert_eq!(frames, vec![3, 3, 3, 3]);
        assert!(!player.is_playing());
        assert_eq!(player.snapshot(), start);
    }

    #[test]
    fn test_stop_from_frame_callback() {
        let player = blinker_player();
        let handle = player.handle();

        player.play();
        let mut seen = 0;
        let generations = player.run(None, |_| {
            seen += 1;
            if seen == 3 {
                handle.stop();
            }
        });

        assert_eq!(generations, 3);
        assert_ne!(player.snapshot(), Pattern::Blinker.on_blank_grid(2).unwrap());
    }

    #[test]
    fn test_stop_from_another_thread() {
        let player = Player::new(Grid::seeded(20, 20, 11).unwrap(), Duration::from_millis(1));
        let handle = player.handle();
        let grid = player.grid();

        player.play();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            grid.lock().toggle(Coord::new(0, 0)).unwrap();
            handle.stop();
        });

        let generations = player.run(None, |_| {});
        stopper.join().unwrap();

        assert!(generations > 0);
        assert_eq!(player.snapshot().cell_count(), 400);
    }

    #[test]
    fn test_step_toggle_clear() {
        let player = blinker_player();
        player.step();
        assert_eq!(player.snapshot().living_count(), 3);

        assert!(player.toggle(Coord::new(0, 0)).unwrap());
        assert!(player.toggle(Coord::new(99, 0)).is_err());

        player.clear();
        assert!(player.snapshot().is_extinct());
    }
}
