use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};
use salemap_config::CrimeSettings;

use super::{crime_page_url, EvidenceProvider};
use crate::error::FetchError;

/// Plain HTTPS GET of the crime page with browser-like headers.
///
/// Retries network errors, 429 and 5xx up to `max_retries` times with
/// doubling backoff (a 429's `Retry-After` wins when present). Every wait
/// is capped at the request timeout. Any other 4xx is final.
pub struct DirectFetch {
    http: Client,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
    backoff: Duration,
}

impl DirectFetch {
    pub fn new(settings: &CrimeSettings) -> Result<Self, FetchError> {
        Self::with_base_url(settings, &settings.base_url)
    }

    /// Same as [`new`](Self::new) against another host (used by tests).
    pub fn with_base_url(settings: &CrimeSettings, base_url: &str) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let http = Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            timeout: settings.request_timeout(),
            max_retries: settings.max_retries,
            backoff: settings.backoff(),
        })
    }

    /// GET with retry. Returns the response body on 2xx.
    pub fn try_fetch(&self, zip: &str) -> Result<String, FetchError> {
        let url = crime_page_url(&self.base_url, zip);
        let mut backoff = self.backoff;

        for attempt in 0..=self.max_retries {
            let last = attempt == self.max_retries;

            let resp = match self.http.get(&url).send() {
                Ok(resp) => resp,
                Err(e) => {
                    let err = if e.is_timeout() {
                        FetchError::Timeout(self.timeout)
                    } else {
                        FetchError::Network(e.to_string())
                    };
                    if last {
                        return Err(err);
                    }
                    log::debug!(
                        "direct fetch {}: retry {}/{} in {}ms ({})",
                        zip,
                        attempt + 1,
                        self.max_retries,
                        backoff.as_millis(),
                        err,
                    );
                    thread::sleep(backoff);
                    backoff *= 2;
                    continue;
                }
            };

            let status = resp.status().as_u16();

            // Retryable: 429, 5xx
            if status == 429 || status >= 500 {
                if last {
                    return Err(FetchError::Http(status));
                }
                // Server-requested waits never exceed one request timeout
                let wait = if status == 429 {
                    resp.headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.trim().parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or(backoff)
                } else {
                    backoff
                }
                .min(self.timeout);
                log::debug!(
                    "direct fetch {}: retry {}/{} in {}ms (HTTP {})",
                    zip,
                    attempt + 1,
                    self.max_retries,
                    wait.as_millis(),
                    status,
                );
                thread::sleep(wait);
                backoff *= 2;
                continue;
            }

            // Everything else that isn't success is final
            if !resp.status().is_success() {
                return Err(FetchError::Http(status));
            }

            return resp.text().map_err(|e| FetchError::Parse(e.to_string()));
        }

        Err(FetchError::Network(format!("no attempt made for {url}")))
    }
}

impl EvidenceProvider for DirectFetch {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn fetch(&self, zip: &str) -> Option<String> {
        match self.try_fetch(zip) {
            Ok(body) => Some(body),
            Err(e) => {
                log::debug!("direct fetch {} failed: {}", zip, e);
                None
            }
        }
    }
}
