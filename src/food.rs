use log::{debug, warn};
use rand::Rng;

use crate::error::GameError;
use crate::grid::{Cell, Grid};
use crate::snake::Snake;

/// Random draws per grid cell before falling back to a full scan.
const ATTEMPTS_PER_CELL: usize = 4;

/// Places the single frog on cells the snake does not occupy.
#[derive(Debug, Clone)]
pub struct FoodSpawner<R> {
    rng: R,
}

impl<R: Rng> FoodSpawner<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws a free cell uniformly at random.
    ///
    /// Rejection sampling covers the normal case where the snake is small
    /// relative to the grid. After `cell_count * ATTEMPTS_PER_CELL` misses the
    /// free cells are enumerated and one is picked directly; only a full board
    /// yields [`GameError::ExhaustedSpawnSpace`].
    pub fn respawn(&mut self, occupied: &Snake, grid: Grid) -> Result<Cell, GameError> {
        let size = i32::from(grid.size());
        let max_attempts = grid.cell_count() * ATTEMPTS_PER_CELL;

        for _ in 0..max_attempts {
            let cell = Cell::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if !occupied.occupies(cell) {
                debug!("frog placed at ({}, {})", cell.x, cell.y);
                return Ok(cell);
            }
        }

        warn!(
            "rejection sampling missed {max_attempts} times with snake length {}; scanning",
            occupied.len()
        );
        spawn_from_free_cells(&mut self.rng, occupied, grid).ok_or(
            GameError::ExhaustedSpawnSpace {
                attempts: max_attempts,
            },
        )
    }
}

fn spawn_from_free_cells<R: Rng>(rng: &mut R, occupied: &Snake, grid: Grid) -> Option<Cell> {
    let candidates: Vec<Cell> = grid
        .cells()
        .filter(|cell| !occupied.occupies(*cell))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    Some(candidates[rng.gen_range(0..candidates.len())])
}
