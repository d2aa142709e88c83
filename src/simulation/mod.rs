//! Running a simulation to completion

pub mod report;
pub mod runner;

pub use report::RunReport;
pub use runner::{NoPacer, Pacer, SleepPacer, Simulation};
