use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical, comparable form of a free-form address.
///
/// Lowercase, single-spaced, comma-free. Only [`normalize`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressKey(String);

impl AddressKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substring test on the normalized forms.
    pub fn contains(&self, other: &AddressKey) -> bool {
        self.0.contains(other.as_str())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Borrow<str> for AddressKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase, collapse whitespace runs to one space (trimming the ends),
/// strip every comma. Pure, total and idempotent.
///
/// Commas are removed per word after splitting, so `"Main St , Apt 2"`
/// keeps a single space where the comma stood alone.
pub fn normalize(raw: &str) -> AddressKey {
    let lowered = raw.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for word in lowered
        .split_whitespace()
        .map(|w| w.replace(',', ""))
        .filter(|w| !w.is_empty())
    {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&word);
    }
    AddressKey(out)
}
