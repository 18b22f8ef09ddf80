//! HTTP document fetching.
//!
//! Uses the curl crate (libcurl) for a blocking GET with a JSON-LD
//! Accept header, bounded timeouts, and transparent redirect following.

use std::time::Duration;

use crate::gateway::error::FetchError;

/// Accept header sent with every context/document fetch: prefer
/// JSON-LD, tolerate plain JSON, accept anything as a last resort.
const ACCEPT_JSONLD: &str = "Accept: application/ld+json, application/json;q=0.9, */*;q=0.1";

/// Trait implemented by document fetchers so the gateway can be tested
/// without network access (a mock can count or deny calls).
pub trait DocumentFetcher {
    /// Fetches `url` and returns the raw response body.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Production fetcher: blocking curl GET.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        list.append(ACCEPT_JSONLD)?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }

        Ok(body)
    }
}
