//! Ship layout for one ocean.

use rand::Rng;

use crate::common::GameError;
use crate::config::{Grid, BOARD_SIZE, NUM_SHIPS};
use crate::coord::Coordinate;

/// Either nothing placed yet, or exactly `NUM_SHIPS` distinct cells.
///
/// The only way to obtain `Placed` is through [`Fleet::place`] or
/// [`Fleet::random`], so a partial layout is unrepresentable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fleet {
    #[default]
    Unplaced,
    Placed(Grid),
}

impl Fleet {
    /// Validate a complete placement.
    pub fn place(cells: &[Coordinate]) -> Result<Self, GameError> {
        if cells.len() != NUM_SHIPS {
            return Err(GameError::WrongCount(cells.len()));
        }
        let mut grid = Grid::new();
        for &c in cells {
            if !mark(&mut grid, c) {
                return Err(GameError::DuplicateCoordinate(c));
            }
        }
        Ok(Fleet::Placed(grid))
    }

    /// Pick `NUM_SHIPS` distinct cells uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let cells = BOARD_SIZE as usize * BOARD_SIZE as usize;
        let mut grid = Grid::new();
        while grid.count_ones() < NUM_SHIPS {
            let idx = rng.random_range(0..cells);
            if let Some(c) = Coordinate::from_index(idx) {
                mark(&mut grid, c);
            }
        }
        Fleet::Placed(grid)
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, Fleet::Placed(_))
    }

    /// Occupied cells; empty when unplaced.
    pub fn grid(&self) -> Grid {
        match self {
            Fleet::Unplaced => Grid::new(),
            Fleet::Placed(g) => *g,
        }
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        self.grid().get(c.row(), c.col()).unwrap_or(false)
    }

    /// Ship cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let grid = self.grid();
        Coordinate::all().filter(move |c| grid.get(c.row(), c.col()).unwrap_or(false))
    }
}

/// Set `c` in `grid`, returning whether it was newly set. A `Coordinate` is
/// always on the board, so the bounds check cannot fail.
pub(crate) fn mark(grid: &mut Grid, c: Coordinate) -> bool {
    let fresh = grid.set(c.row(), c.col());
    debug_assert!(fresh.is_ok(), "coordinate {} off a {}x{} grid", c, BOARD_SIZE, BOARD_SIZE);
    fresh.unwrap_or(false)
}
