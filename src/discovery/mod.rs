//! Href discovery and document loading
//!
//! This module turns raw documents into classified link occurrences:
//! comment stripping, href extraction with line recovery, classification,
//! and the directory walk that loads documents from disk.

pub mod classify;
pub mod comments;
pub mod extractor;
pub mod walker;

// Re-export commonly used items
pub use classify::{classify, is_mailto, partition};
pub use comments::strip_comments;
pub use extractor::{HrefExtractor, HrefFinder};
pub use walker::{collect_documents, read_document_text, relative_to, scan_paths};
