use serde::{Deserialize, Serialize};

/// One row of the tabular sale source.
///
/// The engine only reads the address fields; identity and every other
/// attribute belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(default)]
    pub description: String,
}

impl SaleRecord {
    pub fn new(
        name: impl Into<String>,
        street_address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            street_address: street_address.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// `"{street}, {city}, {state} {zip}"`: the shape the narrative source
    /// prints addresses in.
    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street_address, self.city, self.state, self.zip
        )
    }
}

/// An address/URL pair parsed from the narrative source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateListing {
    pub address: String,
    pub url: String,
}

impl CandidateListing {
    pub fn new(address: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            url: url.into(),
        }
    }
}
