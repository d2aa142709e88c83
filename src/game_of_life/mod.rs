//! Game of Life core functionality

pub mod engine;
pub mod grid;
pub mod io;
pub mod rules;

pub use engine::LifeEngine;
pub use grid::{Cell, Grid, Transition, DEFAULT_MAX_DIMENSION};
pub use io::{
    create_example_boards, infer_population, load_board_file, parse_pasted_board,
    random_population, random_population_sized, save_board_file, Population,
};
pub use rules::{BirthRule, GameOfLifeRules, GenerationStats};
