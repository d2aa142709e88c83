//! Configuration management for the simulator

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, DisplayConfig, InputConfig, OutputConfig, OutputFormat,
    RulesConfig, Settings,
};
