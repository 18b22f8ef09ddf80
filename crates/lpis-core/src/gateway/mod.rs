//! Context resolution gateway.
//!
//! Sits between a JSON-LD processor and the network: every URL the
//! processor wants to dereference (an `@context` pointer or a direct
//! document fetch) goes through [`Gateway::resolve`], which enforces a
//! strict allowlist policy, rewrites vocabulary URLs onto a local or
//! deployed base, fetches with caching, and returns a document
//! descriptor that always reports the *original* requested URL.
//!
//! A gateway instance is built once per expansion/parsing session and
//! discarded afterwards; its cache does not outlive it, and the
//! online/offline mode is fixed at construction rather than read from
//! the environment inside `resolve`.

mod classify;
mod error;
mod fetch;

pub use classify::{allowlist_vendor_path, map_url, ALIAS_BASE, ALLOWLIST, CANONICAL_BASE};
pub use error::{FetchError, GatewayError};
pub use fetch::{DocumentFetcher, HttpFetcher};

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

/// Whether allowlisted third-party contexts are fetched from their
/// origin or substituted with local vendor copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    #[default]
    Online,
    Offline,
}

impl FetchMode {
    pub fn from_online_flag(online: bool) -> Self {
        if online {
            FetchMode::Online
        } else {
            FetchMode::Offline
        }
    }
}

/// Result of a successful resolution: the parsed JSON body plus the
/// originally requested URL. `document_url` is never the internally
/// rewritten fetch target, so downstream identifier logic is stable
/// regardless of where the bytes came from.
#[derive(Debug, Clone)]
pub struct RemoteDocument {
    pub content_url: Option<String>,
    pub document_url: String,
    pub document: Value,
}

/// Per-session resolver. Owns the override base, the fixed fetch mode,
/// and a cache keyed by the post-rewrite (mapped) URL, so canonical and
/// override-prefixed requests for the same physical location share an
/// entry.
pub struct Gateway {
    override_base: String,
    mode: FetchMode,
    cache: HashMap<String, Value>,
    fetcher: Box<dyn DocumentFetcher>,
}

impl Gateway {
    /// Creates a gateway with the production curl fetcher and the
    /// given per-request timeout.
    pub fn new(override_base: impl Into<String>, mode: FetchMode, timeout: Duration) -> Self {
        Self::with_fetcher(override_base, mode, Box::new(HttpFetcher::new(timeout)))
    }

    /// Creates a gateway with an injected fetcher (tests use this to
    /// count or deny network calls).
    pub fn with_fetcher(
        override_base: impl Into<String>,
        mode: FetchMode,
        fetcher: Box<dyn DocumentFetcher>,
    ) -> Self {
        Self {
            override_base: override_base.into(),
            mode,
            cache: HashMap::new(),
            fetcher,
        }
    }

    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    /// Resolves a URL: classify, rewrite, fetch (with caching), parse.
    ///
    /// Fails with [`GatewayError::BlockedFetch`] before any network
    /// activity when the URL matches no rewrite rule.
    pub fn resolve(&mut self, url: &str) -> Result<RemoteDocument, GatewayError> {
        let mapped = map_url(url, &self.override_base, self.mode)?;

        if let Some(doc) = self.cache.get(&mapped) {
            tracing::trace!("cache hit for {}", mapped);
            return Ok(RemoteDocument {
                content_url: None,
                document_url: url.to_string(),
                document: doc.clone(),
            });
        }

        tracing::debug!("fetching {} (requested as {})", mapped, url);
        let body = self
            .fetcher
            .fetch(&mapped)
            .map_err(|source| GatewayError::FetchFailed {
                mapped: mapped.clone(),
                source,
            })?;

        let document: Value =
            serde_json::from_slice(&body).map_err(|source| GatewayError::NonJsonResponse {
                mapped: mapped.clone(),
                source,
            })?;

        self.cache.insert(mapped, document.clone());

        Ok(RemoteDocument {
            content_url: None,
            document_url: url.to_string(),
            document,
        })
    }
}
