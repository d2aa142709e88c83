//! Terminal Game of Life
//!
//! A bounded-grid cellular automaton with a text board loader that infers
//! its alive and dead characters, an engine that evolves the grid one
//! generation at a time, and the run loop and menus that drive it.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod menu;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::LifeError;
pub use game_of_life::{LifeEngine, Population};
pub use simulation::{RunReport, Simulation};
