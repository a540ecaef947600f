//! Ordered evidence resolution: cache, then each available provider.

use std::sync::Arc;

use salemap_core::{sanitize_zip, CrimeGrade};

use crate::cache::EvidenceCache;
use crate::evidence::CrimeEvidence;
use crate::markup::{CrimePageParser, MarkupParser};
use crate::politeness::Throttle;
use crate::providers::ProviderRegistry;

/// How a resolution ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Served from the cache; no provider was invoked.
    CacheHit(CrimeEvidence),
    /// A provider's markup parsed to evidence (now cached).
    Fetched {
        provider: &'static str,
        evidence: CrimeEvidence,
    },
    /// No provider produced usable evidence. Not cached.
    Exhausted,
}

impl Resolution {
    pub fn evidence(&self) -> Option<&CrimeEvidence> {
        match self {
            Self::CacheHit(e) | Self::Fetched { evidence: e, .. } => Some(e),
            Self::Exhausted => None,
        }
    }

    pub fn into_evidence(self) -> Option<CrimeEvidence> {
        match self {
            Self::CacheHit(e) | Self::Fetched { evidence: e, .. } => Some(e),
            Self::Exhausted => None,
        }
    }
}

pub struct ProviderChain {
    registry: ProviderRegistry,
    parser: Box<dyn MarkupParser>,
    throttle: Arc<Throttle>,
}

impl ProviderChain {
    pub fn new(registry: ProviderRegistry, throttle: Throttle) -> Self {
        Self::with_shared_throttle(registry, Arc::new(throttle))
    }

    /// Chain whose network attempts are spaced together with other
    /// holders of `throttle` (the place lookup, in the engine).
    pub fn with_shared_throttle(registry: ProviderRegistry, throttle: Arc<Throttle>) -> Self {
        Self {
            registry,
            parser: Box::new(CrimePageParser::new()),
            throttle,
        }
    }

    /// Chain with no network providers: cache hits only.
    pub fn offline() -> Self {
        Self::new(ProviderRegistry::empty(), Throttle::none())
    }

    pub fn with_parser(mut self, parser: Box<dyn MarkupParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn throttle(&self) -> Arc<Throttle> {
        Arc::clone(&self.throttle)
    }

    /// Walk cache, then providers in order, until one yields evidence.
    /// Markup that fetched but didn't parse counts as a miss for that
    /// provider.
    pub fn resolve(&self, cache: &EvidenceCache, zip: &str) -> Resolution {
        let zip = sanitize_zip(zip);
        if zip.is_empty() {
            return Resolution::Exhausted;
        }

        if let Some(evidence) = cache.crime.get(&zip) {
            log::debug!("crime {}: cache hit", zip);
            return Resolution::CacheHit(evidence);
        }

        for provider in self.registry.iter() {
            self.throttle.wait();
            log::debug!("crime {}: trying {}", zip, provider.name());

            let Some(markup) = provider.fetch(&zip) else {
                continue;
            };
            match self.parser.parse(&markup) {
                Some(evidence) => {
                    cache.crime.put(&zip, evidence.clone());
                    return Resolution::Fetched {
                        provider: provider.name(),
                        evidence,
                    };
                }
                None => log::debug!("crime {}: {} markup had no grade", zip, provider.name()),
            }
        }

        log::debug!("crime {}: no provider produced a grade", zip);
        Resolution::Exhausted
    }

    pub fn resolve_evidence(&self, cache: &EvidenceCache, zip: &str) -> Option<CrimeEvidence> {
        self.resolve(cache, zip).into_evidence()
    }

    /// Overall grade, else violent grade.
    pub fn resolve_crime_grade(&self, cache: &EvidenceCache, zip: &str) -> Option<CrimeGrade> {
        self.resolve(cache, zip)
            .evidence()
            .and_then(CrimeEvidence::primary_grade)
    }
}
