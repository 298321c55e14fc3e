use crate::core::types::BrokenLinkRecord;

/// Single owner of every broken-link record produced during a run.
///
/// Records from both the resolver and the verifier land here; nothing is
/// deduplicated. `into_sorted` gives the order reporting relies on.
#[derive(Debug, Default)]
pub struct Findings {
    records: Vec<BrokenLinkRecord>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: BrokenLinkRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stable sort by (document path, line, reference, reason).
    ///
    /// The reason only breaks ties between findings for the same reference,
    /// whose external checks may finish in any order.
    pub fn into_sorted(mut self) -> Vec<BrokenLinkRecord> {
        self.records.sort_by(|a, b| {
            a.document
                .cmp(&b.document)
                .then(a.line.cmp(&b.line))
                .then_with(|| a.reference.cmp(&b.reference))
                .then_with(|| a.reason.cmp(&b.reason))
        });
        self.records
    }
}

impl Extend<BrokenLinkRecord> for Findings {
    fn extend<I: IntoIterator<Item = BrokenLinkRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}
