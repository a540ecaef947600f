use serde::Serialize;

use crate::model::{LinkOutcome, MatchKind};

/// Counts of how a batch of records linked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    pub total: usize,
    pub exact: usize,
    pub contained: usize,
    pub unmatched: usize,
}

/// Compute summary statistics from link outcomes.
pub fn compute_summary(outcomes: &[LinkOutcome]) -> LinkSummary {
    let mut summary = LinkSummary {
        total: outcomes.len(),
        ..LinkSummary::default()
    };

    for outcome in outcomes {
        match outcome.kind {
            Some(MatchKind::Exact) => summary.exact += 1,
            Some(MatchKind::Contained) => summary.contained += 1,
            None => summary.unmatched += 1,
        }
    }

    summary
}
