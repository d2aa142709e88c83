//! Transition rules and the two-phase generation update

use super::grid::{Grid, Transition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many neighbors a dead cell needs to come alive.
///
/// `AtLeastThree` is the historical behaviour of this program: any dead
/// cell with more than two live neighbors is born. That is a superset of
/// Conway's rule, which `ExactlyThree` implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BirthRule {
    #[default]
    AtLeastThree,
    ExactlyThree,
}

impl BirthRule {
    pub fn is_birth(self, neighbors: u8) -> bool {
        match self {
            BirthRule::AtLeastThree => neighbors > 2,
            BirthRule::ExactlyThree => neighbors == 3,
        }
    }
}

impl fmt::Display for BirthRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BirthRule::AtLeastThree => write!(f, "B3+/S23"),
            BirthRule::ExactlyThree => write!(f, "B3/S23"),
        }
    }
}

/// Counts gathered while computing one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// 1 for the first computed generation
    pub generation: usize,
    pub births: usize,
    pub deaths: usize,
    /// Live cells after commit
    pub population: usize,
}

impl GenerationStats {
    /// Number of cells that flipped state
    pub fn changes(&self) -> usize {
        self.births + self.deaths
    }
}

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Decide the next state of one cell from its current state and the
    /// live neighbor count of the current generation.
    pub fn next_state(alive: bool, neighbors: u8, birth: BirthRule) -> (bool, Transition) {
        match (alive, neighbors) {
            // Underpopulation and overpopulation
            (true, n) if n < 2 || n > 3 => (false, Transition::Died),
            (true, _) => (true, Transition::Unchanged),
            (false, n) if birth.is_birth(n) => (true, Transition::Born),
            (false, _) => (false, Transition::Unchanged),
        }
    }

    /// Evaluate every cell into `next_alive`, then commit all of them.
    ///
    /// Nothing reads `next_alive` during evaluation and nothing writes
    /// `alive` until every cell has been evaluated, so the result does not
    /// depend on scan order.
    pub fn advance_generation(grid: &mut Grid, birth: BirthRule) -> GenerationStats {
        let mut stats = GenerationStats::default();

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let neighbors = grid.count_live_neighbors(x, y);
                let Some(cell) = grid.cell_mut(x, y) else {
                    continue;
                };
                let (next_alive, transition) = Self::next_state(cell.alive, neighbors, birth);
                cell.next_alive = next_alive;
                cell.last_transition = transition;

                match transition {
                    Transition::Died => stats.deaths += 1,
                    Transition::Born => stats.births += 1,
                    _ => {}
                }
            }
        }

        for cell in grid.cells_mut() {
            cell.alive = cell.next_alive;
        }
        stats.population = grid.living_count();
        stats
    }
}
