//! hrefsup checks the `href` attributes of a documentation component in
//! MDX/Markdown files.
//!
//! Internal references are resolved against a docs root on disk, external
//! ones are probed over HTTP with retry and exponential backoff. Findings are
//! reported sorted by document, line and reference.

pub mod checker;
pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod ui;
pub mod validation;

// Re-export main types for convenience
pub use checker::{CheckReport, Checker};
pub use config::{CliConfig, Config};
pub use core::{
    BrokenLinkRecord, CheckOutcome, Document, HrefsUpError, LinkKind, LinkOccurrence, Result,
};
