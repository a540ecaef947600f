//! ZIP directory lookups (Zippopotam-style `{base}/us/{zip}` JSON).

use std::sync::Arc;

use reqwest::blocking::Client;
use salemap_config::PlaceSettings;
use salemap_core::sanitize_zip;
use serde::{Deserialize, Serialize};

use crate::cache::EvidenceCache;
use crate::error::FetchError;
use crate::politeness::Throttle;

const USER_AGENT: &str = concat!("salemap/", env!("CARGO_PKG_VERSION"));

/// Directory record for one ZIP. Field names follow the upstream JSON so
/// cached documents are the raw responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceInfo {
    #[serde(rename = "post code")]
    pub post_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "country abbreviation", default)]
    pub country_abbreviation: String,
    #[serde(default)]
    pub places: Vec<Place>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(rename = "place name")]
    pub place_name: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "state abbreviation", default)]
    pub state_abbreviation: String,
    /// Decimal degrees as text.
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

impl Place {
    /// `(latitude, longitude)` when both parse.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.trim().parse().ok()?;
        let lon = self.longitude.trim().parse().ok()?;
        Some((lat, lon))
    }
}

impl PlaceInfo {
    pub fn primary(&self) -> Option<&Place> {
        self.places.first()
    }
}

pub struct PlaceLookup {
    http: Client,
    base_url: String,
    throttle: Arc<Throttle>,
}

impl PlaceLookup {
    pub fn new(settings: &PlaceSettings) -> Result<Self, FetchError> {
        Self::with_base_url(settings, &settings.base_url)
    }

    pub fn with_base_url(settings: &PlaceSettings, base_url: &str) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            throttle: Arc::new(Throttle::none()),
        })
    }

    /// Space network attempts with everything else sharing `throttle`.
    pub fn with_throttle(mut self, throttle: Arc<Throttle>) -> Self {
        self.throttle = throttle;
        self
    }

    /// One GET, no retry. Non-2xx and malformed bodies are errors.
    pub fn fetch(&self, zip: &str) -> Result<PlaceInfo, FetchError> {
        let url = format!("{}/us/{}", self.base_url, zip);
        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        let text = resp.text().map_err(|e| FetchError::Parse(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Cache-first lookup through the `places` partition. Failures are
    /// logged, return `None`, and are not cached.
    pub fn resolve(&self, cache: &EvidenceCache, zip: &str) -> Option<PlaceInfo> {
        let zip = sanitize_zip(zip);
        if zip.is_empty() {
            return None;
        }
        if let Some(info) = cache.places.get(&zip) {
            log::debug!("place {}: cache hit", zip);
            return Some(info);
        }

        self.throttle.wait();
        match self.fetch(&zip) {
            Ok(info) => {
                cache.places.put(&zip, info.clone());
                Some(info)
            }
            Err(e) => {
                log::debug!("place {} lookup failed: {}", zip, e);
                None
            }
        }
    }
}
