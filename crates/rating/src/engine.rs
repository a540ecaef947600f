use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use salemap_config::Settings;
use salemap_core::NeighborhoodRating;

use crate::batch::{self, BatchOutcome, Location};
use crate::blend::ScoreBlender;
use crate::cache::EvidenceCache;
use crate::chain::ProviderChain;
use crate::evidence::CrimeEvidence;
use crate::places::{PlaceInfo, PlaceLookup};
use crate::politeness::Throttle;
use crate::providers::ProviderRegistry;

/// Everything needed to rate neighborhoods, built once from settings.
///
/// Owns the cache; call [`save`](Self::save) (or let a batch do it) to
/// persist what was learned.
pub struct NeighborhoodEngine {
    settings: Settings,
    cache: EvidenceCache,
    blender: ScoreBlender,
    places: Option<PlaceLookup>,
}

impl NeighborhoodEngine {
    pub fn new(settings: Settings) -> Self {
        let cache = if settings.cache.enabled {
            EvidenceCache::open(&settings.cache.effective_dir())
        } else {
            EvidenceCache::in_memory()
        };

        let registry = if settings.crime.enabled {
            ProviderRegistry::probe(&settings.crime)
        } else {
            ProviderRegistry::empty()
        };
        // One gap between any two network attempts, crime or place
        let throttle = Arc::new(Throttle::new(settings.politeness.delay()));
        let chain = ProviderChain::with_shared_throttle(registry, Arc::clone(&throttle));
        let blender = ScoreBlender::new(chain, settings.crime.enabled);

        let places = if settings.places.enabled {
            match PlaceLookup::new(&settings.places) {
                Ok(lookup) => Some(lookup.with_throttle(throttle)),
                Err(e) => {
                    log::warn!("place lookup unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self::with_parts(settings, cache, blender, places)
    }

    pub fn with_parts(
        settings: Settings,
        cache: EvidenceCache,
        blender: ScoreBlender,
        places: Option<PlaceLookup>,
    ) -> Self {
        Self {
            settings,
            cache,
            blender,
            places,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &EvidenceCache {
        &self.cache
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.blender.chain().registry().names()
    }

    pub fn rating(&self, zip: &str, state: &str, city: &str) -> NeighborhoodRating {
        self.blender.blend(&self.cache, zip, state, city)
    }

    /// Full crime evidence for a ZIP, cache-first. `None` when crime
    /// lookups are disabled.
    pub fn crime_evidence(&self, zip: &str) -> Option<CrimeEvidence> {
        if !self.blender.crime_lookups() {
            return None;
        }
        self.blender.chain().resolve_evidence(&self.cache, zip)
    }

    pub fn place(&self, zip: &str) -> Option<PlaceInfo> {
        self.places.as_ref()?.resolve(&self.cache, zip)
    }

    pub fn resolve_batch(&self, locations: &[Location], cancel: &AtomicBool) -> BatchOutcome {
        batch::resolve_batch(&self.blender, &self.cache, locations, cancel)
    }

    /// Flush the cache. Returns false if a partition could not be written.
    pub fn save(&self) -> bool {
        self.cache.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salemap_core::{CrimeGrade, DataSource};

    fn offline_settings(dir: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        settings.cache.dir = Some(dir.to_path_buf());
        settings.crime.headless = false;
        settings.crime.direct = false;
        settings.politeness.delay_ms = 0;
        settings
    }

    #[test]
    fn offline_engine_uses_income_estimate() {
        let dir = tempfile::tempdir().unwrap();
        let engine = NeighborhoodEngine::new(offline_settings(dir.path()));
        assert!(engine.provider_names().is_empty());
        assert!(engine.place("45501").is_none());

        let r = engine.rating("45501", "OH", "Springfield");
        assert_eq!(r.data_source, DataSource::IncomeEstimate);
        assert_eq!(r.score, 5);
    }

    #[test]
    fn save_and_reload_cache() {
        let dir = tempfile::tempdir().unwrap();
        let engine = NeighborhoodEngine::new(offline_settings(dir.path()));
        engine.cache().crime.put(
            "45501",
            CrimeEvidence {
                overall_grade: Some(CrimeGrade::BMinus),
                ..Default::default()
            },
        );
        assert!(engine.save());

        let reloaded = NeighborhoodEngine::new(offline_settings(dir.path()));
        let evidence = reloaded.crime_evidence("45501").unwrap();
        assert_eq!(evidence.overall_grade, Some(CrimeGrade::BMinus));
        assert_eq!(reloaded.rating("45501", "OH", "").rating.as_str(), "good");
    }

    #[test]
    fn crime_disabled_ignores_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = offline_settings(dir.path());
        settings.crime.enabled = false;
        let engine = NeighborhoodEngine::new(settings);
        engine.cache().crime.put(
            "45501",
            CrimeEvidence {
                overall_grade: Some(CrimeGrade::F),
                ..Default::default()
            },
        );
        assert!(engine.crime_evidence("45501").is_none());
        assert_eq!(engine.rating("45501", "OH", "").data_source, DataSource::IncomeEstimate);
    }

    #[test]
    fn cache_disabled_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = offline_settings(dir.path());
        settings.cache.enabled = false;
        let engine = NeighborhoodEngine::new(settings);
        engine.rating("45501", "OH", "");
        assert!(engine.save());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
