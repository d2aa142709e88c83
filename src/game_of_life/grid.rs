//! Grid representation and utilities for Game of Life

use crate::error::{LifeError, LifeResult};
use serde::{Deserialize, Serialize};

/// Largest side length accepted unless configured otherwise
pub const DEFAULT_MAX_DIMENSION: usize = 1000;

/// What happened to a cell during the most recent generation.
///
/// Only the renderer cares about this; it has no effect on evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Already consumed by a render pass
    Neutral,
    Died,
    Born,
    #[default]
    Unchanged,
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub alive: bool,
    /// Scratch state for the generation being computed. Only meaningful
    /// between evaluation and commit.
    pub next_alive: bool,
    pub last_transition: Transition,
}

/// Represents a bounded Game of Life grid.
///
/// Coordinates are `(x, y)` with `x` the column and `y` the row. The grid
/// never changes size once built; a different size means a new grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid, bounds-checked against `max_dimension`.
    ///
    /// Storage is reserved up front so an allocation failure surfaces as
    /// [`LifeError::AllocationFailure`] instead of aborting.
    pub fn new(width: usize, height: usize, max_dimension: usize) -> LifeResult<Self> {
        check_dimensions(width, height, max_dimension)?;

        let len = width
            .checked_mul(height)
            .ok_or(LifeError::AllocationFailure { cells: usize::MAX })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| LifeError::AllocationFailure { cells: len })?;
        cells.resize(len, Cell::default());

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Create a grid from rows of booleans, `rows[y][x]`
    pub fn from_rows(rows: &[Vec<bool>], max_dimension: usize) -> LifeResult<Self> {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Self::new(width, height, max_dimension)?;

        for (y, row) in rows.iter().enumerate() {
            for (x, &alive) in row.iter().enumerate() {
                grid.set_alive(x, y, alive);
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Cell at coordinates, `None` outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if self.contains(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if self.contains(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Current state; out of bounds cells are dead
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).map_or(false, |cell| cell.alive)
    }

    /// Set the current state of a cell. Returns false if out of bounds.
    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) -> bool {
        match self.cell_mut(x, y) {
            Some(cell) => {
                cell.alive = alive;
                true
            }
            None => false,
        }
    }

    /// Count live cells in the 3x3 block around `(x, y)`, excluding the
    /// center. The border is not wrapped, so edge cells have fewer
    /// neighbors.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let x_range = x.saturating_sub(1)..=(x + 1).min(self.width.saturating_sub(1));
        let y_range = y.saturating_sub(1)..=(y + 1).min(self.height.saturating_sub(1));

        let mut count = 0;
        for ny in y_range {
            for nx in x_range.clone() {
                if nx == x && ny == y {
                    continue;
                }
                if self.cells[self.index(nx, ny)].alive {
                    count += 1;
                }
            }
        }
        count
    }

    /// Row-major iterator over `(x, y, cell)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % width, i / width, cell))
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Get all living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.iter()
            .filter(|(_, _, cell)| cell.alive)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.alive)
    }

    /// Kill every cell and drop pending state
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Current states only, row-major
    pub fn alive_mask(&self) -> Vec<bool> {
        self.cells.iter().map(|cell| cell.alive).collect()
    }
}

/// Check a requested size against `[1, max_dimension]` on both sides
pub fn check_dimensions(width: usize, height: usize, max_dimension: usize) -> LifeResult<()> {
    let valid = |side: usize| (1..=max_dimension).contains(&side);
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(LifeError::InvalidDimensions {
            width,
            height,
            max: max_dimension,
        })
    }
}
