//! End-to-end link checking over a set of loaded documents

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::core::error::{HrefsUpError, Result};
use crate::core::types::{BrokenLinkRecord, Document, LinkKind, LinkOccurrence};
use crate::discovery::{HrefExtractor, HrefFinder, partition};
use crate::reporting::logging;
use crate::reporting::{Findings, RunSummary};
use crate::validation::{ExternalVerifier, InternalResolver, ReqwestTransport, Transport};

/// Sorted findings plus the counts reporting shows next to them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub records: Vec<BrokenLinkRecord>,
    pub summary: RunSummary,
}

pub struct Checker {
    extractor: HrefExtractor,
    resolver: InternalResolver,
    verifier: ExternalVerifier,
    workers: usize,
}

impl Checker {
    /// Build a checker that probes external links through `transport`.
    ///
    /// `root` is the directory internal references resolve against and must exist.
    pub fn new(root: &Path, config: &Config, transport: Arc<dyn Transport>) -> Result<Self> {
        if !root.is_dir() {
            return Err(HrefsUpError::FileNotFound(root.display().to_string()));
        }

        Ok(Self {
            extractor: HrefExtractor::new(config.component_name())?,
            resolver: InternalResolver::new(root),
            verifier: ExternalVerifier::new(transport, config.retry_policy()),
            workers: config.worker_count(),
        })
    }

    /// Build a checker that talks HTTP with reqwest.
    pub fn from_config(root: &Path, config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout_duration(), config.user_agent())?;
        Self::new(root, config, Arc::new(transport))
    }

    /// Every occurrence in every document, in document order.
    pub fn scan(&self, documents: &[Document]) -> Vec<LinkOccurrence> {
        documents
            .iter()
            .flat_map(|document| self.extractor.find_hrefs(document))
            .collect()
    }

    /// Resolve internal links, then verify external ones concurrently.
    ///
    /// Extraction and resolution finish before the first request goes out.
    /// Never fails: every problem ends up as a record.
    pub async fn check_documents(&self, documents: &[Document]) -> CheckReport {
        let started = Instant::now();

        let occurrences = self.scan(documents);
        let total = occurrences.len();
        let (internal, external) = partition(occurrences);
        logging::log_extraction(total, internal.len(), external.len());

        let mut findings = Findings::new();
        findings.extend(
            internal
                .iter()
                .filter_map(|occurrence| self.resolver.check(occurrence)),
        );

        logging::log_validation_start(external.len(), self.workers);
        let external_started = Instant::now();
        let verified = self.verifier.verify_all(external, self.workers).await;
        let elapsed_ms = u64::try_from(external_started.elapsed().as_millis()).unwrap_or(u64::MAX);

        for (occurrence, outcome) in verified {
            logging::log_outcome(&occurrence.reference, &outcome);
            if !outcome.ok {
                findings.push(BrokenLinkRecord::from_occurrence(
                    &occurrence,
                    LinkKind::External,
                    outcome.reason,
                ));
            }
        }

        let records = findings.into_sorted();
        logging::log_validation_complete(total, records.len(), started.elapsed().as_millis());

        CheckReport {
            summary: RunSummary {
                documents: documents.len(),
                occurrences: total,
                broken: records.len(),
                elapsed_ms,
            },
            records,
        }
    }
}
