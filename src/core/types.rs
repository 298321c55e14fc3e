use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::discovery::comments::strip_comments;

/// A documentation file handed to the engine.
///
/// The raw content never changes after loading; the comment-stripped view
/// is derived on demand and only used for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub content: String,
}

impl Document {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, content: S) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// The content with every comment block removed.
    pub fn filtered(&self) -> String {
        strip_comments(&self.content)
    }
}

/// One matched `href` at a specific document and line.
///
/// Identical references are independent occurrences; nothing is
/// deduplicated before reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    /// Document the reference was found in
    pub document: PathBuf,
    /// Attribute value, whitespace-trimmed
    pub reference: String,
    /// Line number in the original (unfiltered) text (1-indexed)
    pub line: u64,
}

impl LinkOccurrence {
    pub fn new<S: Into<String>>(document: &Path, reference: S, line: u64) -> Self {
        Self {
            document: document.to_path_buf(),
            reference: reference.into(),
            line,
        }
    }
}

/// Whether a reference needs a network fetch or resolves inside the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    External,
    Internal,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::External => write!(f, "external"),
            LinkKind::Internal => write!(f, "internal"),
        }
    }
}

/// Result of checking one occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub ok: bool,
    pub reason: String,
}

impl CheckOutcome {
    pub fn success<S: Into<String>>(reason: S) -> Self {
        Self {
            ok: true,
            reason: reason.into(),
        }
    }

    pub fn failure<S: Into<String>>(reason: S) -> Self {
        Self {
            ok: false,
            reason: reason.into(),
        }
    }
}

/// A broken or policy-violating reference, ready for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLinkRecord {
    pub document: PathBuf,
    pub line: u64,
    pub reference: String,
    pub kind: LinkKind,
    pub reason: String,
}

impl BrokenLinkRecord {
    pub fn from_occurrence<S: Into<String>>(
        occurrence: &LinkOccurrence,
        kind: LinkKind,
        reason: S,
    ) -> Self {
        Self {
            document: occurrence.document.clone(),
            line: occurrence.line,
            reference: occurrence.reference.clone(),
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BrokenLinkRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {} - {}",
            self.document.display(),
            self.line,
            self.kind,
            self.reference,
            self.reason
        )
    }
}
