use salemap_core::SaleRecord;

use crate::index::CandidateIndex;
use crate::model::{LinkMatch, LinkOutcome, MatchKind};
use crate::normalize::normalize;

/// Link a sale record to a candidate listing. First rule that hits wins:
///
/// 1. exact lookup of the full `street, city, state zip` key;
/// 2. first candidate (insertion order) whose key contains the
///    street-only key;
/// 3. no match.
///
/// Rule 2 can pick an unrelated listing when the street key is a short
/// substring of another address. Ties are broken by candidate order only.
pub fn link<'a>(target: &SaleRecord, candidates: &'a CandidateIndex) -> Option<LinkMatch<'a>> {
    let full_key = normalize(&target.full_address());
    if let Some(url) = candidates.get(&full_key) {
        return Some(LinkMatch {
            url,
            kind: MatchKind::Exact,
        });
    }

    // An empty street key is a substring of everything.
    let street_key = normalize(&target.street_address);
    if street_key.is_empty() {
        return None;
    }

    candidates
        .iter()
        .find(|(key, _)| key.contains(&street_key))
        .map(|(_, url)| LinkMatch {
            url,
            kind: MatchKind::Contained,
        })
}

/// Matched URL for `target`, or `None` when no detail page exists.
pub fn find_url<'a>(target: &SaleRecord, candidates: &'a CandidateIndex) -> Option<&'a str> {
    link(target, candidates).map(|m| m.url)
}

/// Link every record, preserving input order.
pub fn link_all(records: &[SaleRecord], candidates: &CandidateIndex) -> Vec<LinkOutcome> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let found = link(record, candidates);
            if found.is_none() {
                log::debug!("no listing for '{}'", record.full_address());
            }
            LinkOutcome {
                index,
                url: found.map(|m| m.url.to_string()),
                kind: found.map(|m| m.kind),
            }
        })
        .collect()
}
