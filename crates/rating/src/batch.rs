//! Rate many locations, one lookup per distinct ZIP.

use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;
use salemap_core::{sanitize_zip, NeighborhoodRating, SaleRecord};

use crate::blend::ScoreBlender;
use crate::cache::EvidenceCache;

/// A (zip, state, city) triple to rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub zip: String,
    pub state: String,
    pub city: String,
}

impl Location {
    pub fn new(zip: impl Into<String>, state: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            zip: zip.into(),
            state: state.into(),
            city: city.into(),
        }
    }
}

impl From<&SaleRecord> for Location {
    fn from(record: &SaleRecord) -> Self {
        Self::new(&record.zip, &record.state, &record.city)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Keyed by sanitized ZIP, first-seen order.
    pub ratings: IndexMap<String, NeighborhoodRating>,
    /// Stopped early on the cancellation flag.
    pub cancelled: bool,
}

impl BatchOutcome {
    pub fn rating_for(&self, zip: &str) -> Option<&NeighborhoodRating> {
        self.ratings.get(sanitize_zip(zip).as_str())
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

/// Rate each distinct ZIP once; the first location with a ZIP supplies
/// its state and city. Empty ZIPs are skipped. `cancel` is checked before
/// every lookup. The cache is flushed once at the end, cancelled or not.
pub fn resolve_batch<'a, I>(
    blender: &ScoreBlender,
    cache: &EvidenceCache,
    locations: I,
    cancel: &AtomicBool,
) -> BatchOutcome
where
    I: IntoIterator<Item = &'a Location>,
{
    let mut outcome = BatchOutcome::default();

    for location in locations {
        let zip = sanitize_zip(&location.zip);
        if zip.is_empty() || outcome.ratings.contains_key(&zip) {
            continue;
        }
        if cancel.load(Ordering::Relaxed) {
            log::info!("batch cancelled after {} ZIPs", outcome.ratings.len());
            outcome.cancelled = true;
            break;
        }

        let rating = blender.blend(cache, &zip, &location.state, &location.city);
        log::info!(
            "ZIP {} ({}, {}): {} {}/10 [{}]",
            zip,
            rating.city,
            rating.state,
            rating.rating,
            rating.score,
            rating.data_source
        );
        outcome.ratings.insert(zip, rating);
    }

    cache.flush();
    outcome
}
