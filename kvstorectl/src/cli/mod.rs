//! CLI command definitions and handlers
//!
//! - [`commands`] - Command and subcommand definitions
//! - [`handlers`] - Command execution handlers

mod commands;
mod handlers;

pub use commands::*;
pub use handlers::*;
