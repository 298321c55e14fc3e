//! User interface
//!
//! Command-line parsing and its mapping onto configuration overrides.

pub mod cli;

// Re-export commonly used items
pub use cli::{Cli, cli_to_config};
