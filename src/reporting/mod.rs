//! Findings and reporting
//!
//! This module collects broken-link records into their final order and
//! renders them for the console, CI annotations and markdown summaries,
//! along with the structured logging used throughout a run.

pub mod findings;
pub mod logging;
pub mod output;

// Re-export commonly used items
pub use findings::Findings;
pub use output::{RunSummary, exit_code};
