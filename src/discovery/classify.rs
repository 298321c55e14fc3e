use crate::core::types::{LinkKind, LinkOccurrence};

const MAILTO_SCHEME: &str = "mailto:";
const EXTERNAL_PREFIXES: [&str; 3] = ["http://", "https://", MAILTO_SCHEME];

/// External for `http://`, `https://` and `mailto:` references, Internal otherwise.
pub fn classify(reference: &str) -> LinkKind {
    if EXTERNAL_PREFIXES
        .iter()
        .any(|prefix| reference.starts_with(prefix))
    {
        LinkKind::External
    } else {
        LinkKind::Internal
    }
}

pub fn is_mailto(reference: &str) -> bool {
    reference.starts_with(MAILTO_SCHEME)
}

/// Split occurrences into `(internal, external)`, keeping their order.
pub fn partition(occurrences: Vec<LinkOccurrence>) -> (Vec<LinkOccurrence>, Vec<LinkOccurrence>) {
    occurrences
        .into_iter()
        .partition(|occurrence| classify(&occurrence.reference) == LinkKind::Internal)
}
