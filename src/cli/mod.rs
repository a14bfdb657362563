//! CLI module
//!
//! Command-line interface over the typed clients.
//!
//! # Commands
//!
//! - `get` - Read records from a resource using any paging mode
//! - `errors` - Read the error log
//! - `resources` - List available resources
//! - `appconfig` - Show the application configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, FilterArgs, OutputFormat};
pub use runner::Runner;

#[cfg(test)]
mod tests;
