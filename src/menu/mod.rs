//! Interactive menus around the simulation

pub mod commands;
pub mod instructions;
pub mod session;

pub use commands::{MainCommand, MenuKey, Parsed, SettingsCommand};
pub use instructions::InstructionTopic;
pub use session::Menu;
