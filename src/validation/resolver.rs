use std::path::{Path, PathBuf};

use crate::core::constants::{markup, reasons};
use crate::core::types::{BrokenLinkRecord, CheckOutcome, LinkKind, LinkOccurrence};

/// Resolves repository-relative references against a root directory.
///
/// A reference is valid when any of five candidates exists under the root:
/// the path itself, the path with `.mdx` or `.md` appended, or an
/// `index.mdx`/`index.md` inside it.
#[derive(Debug, Clone)]
pub struct InternalResolver {
    root: PathBuf,
}

impl InternalResolver {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Drop any `#fragment` or `?query` and a single leading `/`.
    pub fn normalize(reference: &str) -> &str {
        let end = reference.find(['#', '?']).unwrap_or(reference.len());
        let path = &reference[..end];
        path.strip_prefix('/').unwrap_or(path)
    }

    pub fn candidates(&self, path: &str) -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(1 + 2 * markup::EXTENSIONS.len());
        candidates.push(self.root.join(path));
        for ext in markup::EXTENSIONS {
            candidates.push(self.root.join(format!("{path}.{ext}")));
        }
        for ext in markup::EXTENSIONS {
            candidates.push(
                self.root
                    .join(path)
                    .join(format!("{}.{ext}", markup::INDEX_STEM)),
            );
        }
        candidates
    }

    /// First existing candidate for `reference`, if any.
    pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
        self.candidates(Self::normalize(reference))
            .into_iter()
            .find(|candidate| candidate.exists())
    }

    pub fn check_reference(&self, reference: &str) -> CheckOutcome {
        match self.resolve(reference) {
            Some(found) => CheckOutcome::success(format!("resolved to {}", found.display())),
            None => CheckOutcome::failure(reasons::FILE_NOT_FOUND),
        }
    }

    /// Whether the reference names a raw source page instead of its published path.
    ///
    /// The extension is compared case-insensitively.
    pub fn points_at_source_markup(reference: &str) -> bool {
        Self::normalize(reference)
            .to_ascii_lowercase()
            .ends_with(&format!(".{}", markup::PRIMARY_EXTENSION))
    }

    /// At most one record per occurrence.
    ///
    /// A missing target yields `File not found` and skips the policy check;
    /// an existing target that names a source page yields a policy record.
    pub fn check(&self, occurrence: &LinkOccurrence) -> Option<BrokenLinkRecord> {
        let outcome = self.check_reference(&occurrence.reference);
        if !outcome.ok {
            return Some(BrokenLinkRecord::from_occurrence(
                occurrence,
                LinkKind::Internal,
                outcome.reason,
            ));
        }

        if Self::points_at_source_markup(&occurrence.reference) {
            return Some(BrokenLinkRecord::from_occurrence(
                occurrence,
                LinkKind::Internal,
                reasons::SOURCE_MARKUP_POLICY,
            ));
        }

        None
    }
}
