use indexmap::IndexMap;
use salemap_core::CandidateListing;

use crate::normalize::{normalize, AddressKey};

/// Candidate listings keyed by normalized address, in insertion order.
///
/// Iteration order decides containment ties, so it must follow the order
/// listings appeared in the narrative source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateIndex {
    entries: IndexMap<AddressKey, String>,
}

impl CandidateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from parsed listings. A repeated address keeps its first
    /// position and takes the later URL.
    pub fn from_listings<'a, I>(listings: I) -> Self
    where
        I: IntoIterator<Item = &'a CandidateListing>,
    {
        let mut index = Self::new();
        for listing in listings {
            index.insert(&listing.address, &listing.url);
        }
        index
    }

    /// Normalize `address` and record its URL.
    pub fn insert(&mut self, address: &str, url: &str) {
        let key = normalize(address);
        if let Some(previous) = self.entries.insert(key, url.to_string()) {
            if previous != url {
                log::debug!("address '{}' listed twice; keeping latest URL", address);
            }
        }
    }

    pub fn get(&self, key: &AddressKey) -> Option<&str> {
        self.entries.get(key.as_str()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AddressKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<&'a CandidateListing> for CandidateIndex {
    fn from_iter<T: IntoIterator<Item = &'a CandidateListing>>(iter: T) -> Self {
        Self::from_listings(iter)
    }
}
