use salemap_config::CrimeSettings;

use super::{DirectFetch, EvidenceProvider, HeadlessBrowser};

/// The network providers available to this process, in the order the
/// chain tries them.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn EvidenceProvider>>,
}

impl ProviderRegistry {
    /// Headless first (only when a browser is installed), then direct.
    pub fn probe(settings: &CrimeSettings) -> Self {
        let mut providers: Vec<Box<dyn EvidenceProvider>> = Vec::new();

        if settings.headless {
            match HeadlessBrowser::probe(settings) {
                Some(browser) => providers.push(Box::new(browser)),
                None => log::debug!("no headless browser found; skipping headless provider"),
            }
        }

        if settings.direct {
            match DirectFetch::new(settings) {
                Ok(direct) => providers.push(Box::new(direct)),
                Err(e) => log::warn!("direct fetch provider unavailable: {}", e),
            }
        }

        let registry = Self { providers };
        log::debug!("crime providers: {:?}", registry.names());
        registry
    }

    pub fn from_providers(providers: Vec<Box<dyn EvidenceProvider>>) -> Self {
        Self { providers }
    }

    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn EvidenceProvider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn direct_only_when_browser_missing() {
        let settings = CrimeSettings {
            browser_path: Some(PathBuf::from("/nonexistent/chrome")),
            ..CrimeSettings::default()
        };
        assert_eq!(ProviderRegistry::probe(&settings).names(), vec!["direct"]);
    }

    #[test]
    fn everything_disabled() {
        let settings = CrimeSettings {
            headless: false,
            direct: false,
            ..CrimeSettings::default()
        };
        assert!(ProviderRegistry::probe(&settings).is_empty());
    }

    #[test]
    fn headless_skipped_when_disabled() {
        let settings = CrimeSettings {
            headless: false,
            ..CrimeSettings::default()
        };
        let names = ProviderRegistry::probe(&settings).names();
        assert!(!names.contains(&"headless"));
    }
}
