//! The simulation engine: owns one grid for the lifetime of a run

use super::grid::Grid;
use super::io::Population;
use super::rules::{BirthRule, GameOfLifeRules, GenerationStats};
use crate::error::{LifeError, LifeResult};
use tracing::{debug, info};

pub struct LifeEngine {
    grid: Grid,
    birth: BirthRule,
    generation: usize,
    last_stats: Option<GenerationStats>,
}

impl LifeEngine {
    /// Build an engine with an all-dead grid. Fails without allocating
    /// anything if either side is outside `[1, max_dimension]`.
    pub fn create(
        width: usize,
        height: usize,
        max_dimension: usize,
        birth: BirthRule,
    ) -> LifeResult<Self> {
        let grid = Grid::new(width, height, max_dimension)?;
        info!(width, height, rule = %birth, "created grid");
        Ok(Self {
            grid,
            birth,
            generation: 0,
            last_stats: None,
        })
    }

    /// Build an engine sized to a loaded population and seed it
    pub fn from_population(
        population: &Population,
        max_dimension: usize,
        birth: BirthRule,
    ) -> LifeResult<Self> {
        let mut engine = Self::create(population.width, population.height, max_dimension, birth)?;
        engine.seed(population)?;
        Ok(engine)
    }

    /// Copy a population's live cells into the grid. The population must
    /// match the grid's dimensions.
    pub fn seed(&mut self, population: &Population) -> LifeResult<()> {
        if population.width != self.grid.width() || population.height != self.grid.height() {
            return Err(LifeError::DimensionMismatch {
                expected: (self.grid.width(), self.grid.height()),
                found: (population.width, population.height),
            });
        }
        self.grid.clear();
        for (x, y) in population.alive_cells() {
            self.grid.set_alive(x, y, true);
        }
        debug!(population = self.grid.living_count(), "seeded grid");
        Ok(())
    }

    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) -> bool {
        self.grid.set_alive(x, y, alive)
    }

    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        self.grid.count_live_neighbors(x, y)
    }

    /// Compute and commit the next generation. Returns how many cells
    /// flipped state; zero means the population is stable.
    pub fn advance_generation(&mut self) -> usize {
        let mut stats = GameOfLifeRules::advance_generation(&mut self.grid, self.birth);
        self.generation += 1;
        stats.generation = self.generation;
        debug!(
            generation = stats.generation,
            births = stats.births,
            deaths = stats.deaths,
            population = stats.population,
            "advanced generation"
        );
        self.last_stats = Some(stats);
        stats.changes()
    }

    /// Kill every cell and restart the generation counter
    pub fn reset(&mut self) {
        self.grid.clear();
        self.generation = 0;
        self.last_stats = None;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for the renderer, which consumes transition tags
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Generations computed so far
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn last_stats(&self) -> Option<&GenerationStats> {
        self.last_stats.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::grid::{Transition, DEFAULT_MAX_DIMENSION};
    use crate::game_of_life::io::infer_population;
    use std::collections::BTreeSet;

    fn engine(width: usize, height: usize, birth: BirthRule) -> LifeEngine {
        LifeEngine::create(width, height, DEFAULT_MAX_DIMENSION, birth).unwrap()
    }

    fn living(engine: &LifeEngine) -> BTreeSet<(usize, usize)> {
        engine.grid().living_cells().into_iter().collect()
    }

    #[test]
    fn test_create_bounds() {
        assert!(matches!(
            LifeEngine::create(0, 5, DEFAULT_MAX_DIMENSION, BirthRule::default()),
            Err(LifeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            LifeEngine::create(1001, 5, DEFAULT_MAX_DIMENSION, BirthRule::default()),
            Err(LifeError::InvalidDimensions { .. })
        ));

        let engine = engine(10, 10, BirthRule::default());
        assert!(engine.grid().is_empty());
        assert_eq!(engine.generation(), 0);
        assert!(engine.last_stats().is_none());
    }

    #[test]
    fn test_isolated_cell() {
        let mut engine = engine(10, 10, BirthRule::default());
        engine.set_alive(4, 4, true);

        assert_eq!(engine.advance_generation(), 1);
        assert!(engine.grid().is_empty());
        assert_eq!(engine.advance_generation(), 0);
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn test_block_is_still() {
        let mut engine = engine(4, 4, BirthRule::default());
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            engine.set_alive(x, y, true);
        }
        let before = engine.grid().alive_mask();

        assert_eq!(engine.advance_generation(), 0);
        assert_eq!(engine.grid().alive_mask(), before);
    }

    const GLIDER: [(usize, usize); 5] = [(4, 3), (5, 4), (3, 5), (4, 5), (5, 5)];

    #[test]
    fn test_glider_translates_under_conway_birth() {
        let mut engine = engine(10, 10, BirthRule::ExactlyThree);
        for (x, y) in GLIDER {
            engine.set_alive(x, y, true);
        }

        for _ in 0..4 {
            assert!(engine.advance_generation() > 0);
        }

        let expected: BTreeSet<_> = GLIDER.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        assert_eq!(living(&engine), expected);
    }

    #[test]
    fn test_glider_breaks_under_default_birth() {
        let mut engine = engine(10, 10, BirthRule::AtLeastThree);
        for (x, y) in GLIDER {
            engine.set_alive(x, y, true);
        }
        engine.advance_generation();

        // (4,4) has five live neighbors and is born only under the default rule
        let expected: BTreeSet<_> = [(3, 4), (4, 4), (4, 5), (4, 6), (5, 4), (5, 5)]
            .into_iter()
            .collect();
        assert_eq!(living(&engine), expected);
        assert_eq!(engine.last_stats().unwrap().births, 3);
    }

    #[test]
    fn test_stats_and_tags() {
        let mut engine = engine(5, 5, BirthRule::default());
        for (x, y) in [(1, 2), (2, 2), (3, 2)] {
            engine.set_alive(x, y, true);
        }

        let changed = engine.advance_generation();
        let stats = *engine.last_stats().unwrap();
        assert_eq!(changed, 4);
        assert_eq!(stats.generation, 1);
        assert_eq!(stats.births, 2);
        assert_eq!(stats.deaths, 2);
        assert_eq!(stats.population, 3);

        let grid = engine.grid();
        assert_eq!(grid.cell(2, 1).unwrap().last_transition, Transition::Born);
        assert_eq!(grid.cell(1, 2).unwrap().last_transition, Transition::Died);
        assert_eq!(grid.cell(2, 2).unwrap().last_transition, Transition::Unchanged);
    }

    #[test]
    fn test_seed_from_population() {
        let population = infer_population(b"....o\n.oo..\n.....\n", DEFAULT_MAX_DIMENSION).unwrap();
        let engine =
            LifeEngine::from_population(&population, DEFAULT_MAX_DIMENSION, BirthRule::default())
                .unwrap();

        assert_eq!(engine.grid().width(), 5);
        assert_eq!(engine.grid().height(), 3);
        assert_eq!(engine.grid().living_cells(), vec![(4, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_seed_dimension_mismatch() {
        let population = infer_population(b"oo\noo\n", DEFAULT_MAX_DIMENSION).unwrap();
        let mut engine = engine(3, 3, BirthRule::default());
        assert!(matches!(
            engine.seed(&population),
            Err(LifeError::DimensionMismatch { expected: (3, 3), found: (2, 2) })
        ));
        assert!(engine.grid().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut engine = engine(4, 4, BirthRule::default());
        engine.set_alive(0, 0, true);
        engine.advance_generation();
        engine.set_alive(1, 1, true);

        engine.reset();
        assert!(engine.grid().is_empty());
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.grid().width(), 4);
    }

    #[test]
    fn test_independent_engines() {
        let mut a = engine(3, 3, BirthRule::default());
        let b = engine(3, 3, BirthRule::default());
        a.set_alive(1, 1, true);
        assert!(!b.grid().is_alive(1, 1));
    }
}
