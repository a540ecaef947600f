//! Network evidence providers.
//!
//! Each provider turns a sanitized ZIP into raw crime-page markup or
//! nothing. Ordinary failures (timeouts, 404s, bot walls, a browser that
//! crashes) are logged and collapse to `None`; the chain moves on.

mod direct;
mod headless;
mod registry;

pub use direct::DirectFetch;
pub use headless::HeadlessBrowser;
pub use registry::ProviderRegistry;

/// A source of raw crime-page markup for one ZIP.
pub trait EvidenceProvider: Send + Sync {
    /// Short stable name for logs ("headless", "direct").
    fn name(&self) -> &'static str;

    /// Markup for `zip`, or `None` on any ordinary failure.
    fn fetch(&self, zip: &str) -> Option<String>;
}

/// Per-ZIP crime page: `{base}/safest-places-in-{zip}/`.
pub fn crime_page_url(base_url: &str, zip: &str) -> String {
    format!("{}/safest-places-in-{}/", base_url.trim_end_matches('/'), zip)
}
