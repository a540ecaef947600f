use serde::Serialize;

// ---------------------------------------------------------------------------
// Match results
// ---------------------------------------------------------------------------

/// Which rule produced a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Full `street, city, state zip` key found verbatim.
    Exact,
    /// Street-only key found inside a candidate key.
    Contained,
}

/// A successful link: the candidate URL and how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkMatch<'a> {
    pub url: &'a str,
    pub kind: MatchKind,
}

/// Per-record linkage result, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOutcome {
    /// Position of the record in the input slice.
    pub index: usize,
    /// Matched URL; `None` means no detail page exists for the record.
    pub url: Option<String>,
    pub kind: Option<MatchKind>,
}

impl LinkOutcome {
    /// Empty string when unmatched, the shape the map writer expects.
    pub fn url_or_empty(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }
}
