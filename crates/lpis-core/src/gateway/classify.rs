//! URL classification: decides where (and whether) a requested URL may
//! be fetched from.
//!
//! Exactly one rewrite rule applies per input, evaluated in order:
//! canonical base, alias base, allowlist exact match, override-prefix.
//! Anything else is rejected; there is no default-allow.

use crate::gateway::error::GatewayError;
use crate::gateway::FetchMode;

/// Fixed IRI prefix under which the vocabulary's own documents live.
pub const CANONICAL_BASE: &str = "https://livepublication.org/interface-schemas";

/// w3id.org redirector prefix, equivalent to [`CANONICAL_BASE`].
pub const ALIAS_BASE: &str = "https://w3id.org/livepublication/interface-schemas";

/// External context documents that may be fetched from their origin,
/// paired with the vendor copy (relative to the override base) used in
/// offline mode. Every allowlist entry has a vendor path; that is a
/// structural invariant of this table, not a runtime condition.
pub const ALLOWLIST: &[(&str, &str)] = &[
    (
        "https://w3id.org/ro/crate/1.1/context",
        "vendor/ro-crate/1.1/context.jsonld",
    ),
    (
        "https://w3id.org/ro/terms/workflow-run/context",
        "vendor/ro-terms/workflow-run/context.jsonld",
    ),
];

/// Returns the vendor path for an allowlisted URL, or `None` if the URL
/// is not on the allowlist.
pub fn allowlist_vendor_path(url: &str) -> Option<&'static str> {
    ALLOWLIST
        .iter()
        .find(|(allowed, _)| *allowed == url)
        .map(|(_, vendor)| *vendor)
}

/// Maps a requested URL to the URL that will actually be fetched.
///
/// Rules, first match wins (canonical/alias are more specific than the
/// generic override-prefix rule and must win over it):
///
/// 1. Canonical prefix: rewritten onto `override_base`.
/// 2. Alias prefix: rewritten to the canonical equivalent, then rule 1.
/// 3. Allowlist exact match: fetched from origin when online, from the
///    vendor copy under `override_base` when offline.
/// 4. Same-origin, same-or-deeper-path match against `override_base`:
///    fetched as-is.
///
/// Everything else fails with [`GatewayError::BlockedFetch`].
pub fn map_url(url: &str, override_base: &str, mode: FetchMode) -> Result<String, GatewayError> {
    if url.is_empty() {
        return Err(GatewayError::BlockedFetch {
            url: url.to_string(),
        });
    }

    if let Some(rest) = url.strip_prefix(CANONICAL_BASE) {
        return Ok(format!("{}{}", override_base, rest));
    }

    if let Some(rest) = url.strip_prefix(ALIAS_BASE) {
        // Alias is defined as equivalent to canonical; the canonical
        // form then takes the rule-1 substitution.
        return Ok(format!("{}{}", override_base, rest));
    }

    if let Some(vendor) = allowlist_vendor_path(url) {
        return Ok(match mode {
            FetchMode::Online => url.to_string(),
            FetchMode::Offline => {
                format!("{}/{}", override_base.trim_end_matches('/'), vendor)
            }
        });
    }

    if !override_base.is_empty() && is_same_origin_path_prefix(url, override_base) {
        return Ok(url.to_string());
    }

    Err(GatewayError::BlockedFetch {
        url: url.to_string(),
    })
}

/// True if `url` shares scheme, host, and port with `base` and its path
/// is the same as or deeper than `base`'s path, compared per segment.
///
/// This is a structural check, not a string-prefix check:
/// `base = "https://h/app"` does not match `"https://h/application/x"`.
/// Only http(s) origins qualify; anything else never matches.
fn is_same_origin_path_prefix(url: &str, base: &str) -> bool {
    let (parsed_url, parsed_base) = match (url::Url::parse(url), url::Url::parse(base)) {
        (Ok(u), Ok(b)) => (u, b),
        _ => return false,
    };

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return false;
    }
    if parsed_url.scheme() != parsed_base.scheme()
        || parsed_url.host_str() != parsed_base.host_str()
        || parsed_url.port_or_known_default() != parsed_base.port_or_known_default()
    {
        return false;
    }

    let base_segments: Vec<&str> = parsed_base
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let url_segments: Vec<&str> = parsed_url
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    url_segments.len() >= base_segments.len()
        && url_segments[..base_segments.len()] == base_segments[..]
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8000/interface-schemas";

    #[test]
    fn canonical_prefix_rewrites_onto_override_base() {
        let mapped = map_url(
            "https://livepublication.org/interface-schemas/dpc/contexts/v1.jsonld",
            BASE,
            FetchMode::Online,
        )
        .unwrap();
        assert_eq!(mapped, "http://localhost:8000/interface-schemas/dpc/contexts/v1.jsonld");
    }

    #[test]
    fn alias_prefix_is_equivalent_to_canonical() {
        let via_alias = map_url(
            "https://w3id.org/livepublication/interface-schemas/dsc/contexts/v1.jsonld",
            BASE,
            FetchMode::Online,
        )
        .unwrap();
        let via_canonical = map_url(
            "https://livepublication.org/interface-schemas/dsc/contexts/v1.jsonld",
            BASE,
            FetchMode::Online,
        )
        .unwrap();
        assert_eq!(via_alias, via_canonical);
    }

    #[test]
    fn allowlist_online_fetches_origin() {
        let mapped = map_url(
            "https://w3id.org/ro/crate/1.1/context",
            BASE,
            FetchMode::Online,
        )
        .unwrap();
        assert_eq!(mapped, "https://w3id.org/ro/crate/1.1/context");
    }

    #[test]
    fn allowlist_offline_maps_to_vendor_copy() {
        let mapped = map_url(
            "https://w3id.org/ro/crate/1.1/context",
            BASE,
            FetchMode::Offline,
        )
        .unwrap();
        assert_eq!(
            mapped,
            "http://localhost:8000/interface-schemas/vendor/ro-crate/1.1/context.jsonld"
        );
    }

    #[test]
    fn workflow_run_offline_maps_to_vendor_copy() {
        let mapped = map_url(
            "https://w3id.org/ro/terms/workflow-run/context",
            BASE,
            FetchMode::Offline,
        )
        .unwrap();
        assert_eq!(
            mapped,
            "http://localhost:8000/interface-schemas/vendor/ro-terms/workflow-run/context.jsonld"
        );
    }

    #[test]
    fn override_prefix_match_passes_through() {
        let url = "http://localhost:8000/interface-schemas/contexts/lp-dscdpc/v1.jsonld";
        assert_eq!(map_url(url, BASE, FetchMode::Online).unwrap(), url);
    }

    #[test]
    fn unknown_url_is_blocked() {
        let err = map_url(
            "https://not-allowed.example/context.jsonld",
            BASE,
            FetchMode::Online,
        )
        .unwrap_err();
        match err {
            GatewayError::BlockedFetch { url } => {
                assert_eq!(url, "https://not-allowed.example/context.jsonld");
            }
            other => panic!("expected BlockedFetch, got {:?}", other),
        }
    }

    #[test]
    fn empty_url_is_blocked() {
        assert!(matches!(
            map_url("", BASE, FetchMode::Online),
            Err(GatewayError::BlockedFetch { .. })
        ));
    }

    #[test]
    fn origin_check_is_path_segment_aware() {
        // Plain string prefix would accept this; segment comparison must not.
        assert!(matches!(
            map_url(
                "https://h/application/x",
                "https://h/app",
                FetchMode::Online
            ),
            Err(GatewayError::BlockedFetch { .. })
        ));
        // The exact base path and deeper paths are fine.
        assert!(map_url("https://h/app", "https://h/app", FetchMode::Online).is_ok());
        assert!(map_url("https://h/app/x", "https://h/app", FetchMode::Online).is_ok());
    }

    #[test]
    fn origin_check_requires_same_scheme_host_port() {
        assert!(map_url("https://h:8443/app/x", "https://h/app", FetchMode::Online).is_err());
        assert!(map_url("http://h/app/x", "https://h/app", FetchMode::Online).is_err());
        assert!(map_url("https://other/app/x", "https://h/app", FetchMode::Online).is_err());
        // Default ports are equivalent to explicit ones.
        assert!(map_url("https://h:443/app/x", "https://h/app", FetchMode::Online).is_ok());
    }

    #[test]
    fn non_http_scheme_is_blocked() {
        assert!(matches!(
            map_url(
                "ftp://example.org/anything.jsonld",
                "ftp://example.org",
                FetchMode::Online
            ),
            Err(GatewayError::BlockedFetch { .. })
        ));
    }

    #[test]
    fn empty_override_base_blocks_non_vocabulary_urls() {
        assert!(matches!(
            map_url("http://localhost:8000/x", "", FetchMode::Online),
            Err(GatewayError::BlockedFetch { .. })
        ));
    }

    #[test]
    fn every_allowlist_entry_has_a_vendor_path() {
        for (allowed, _) in ALLOWLIST {
            assert!(allowlist_vendor_path(allowed).is_some());
        }
        assert!(allowlist_vendor_path("https://w3id.org/ro/crate/1.2/context").is_none());
    }
}
