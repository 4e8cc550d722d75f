//! Fixed host allow-list for outbound fetches.

use c2pa_docs_core::Error;
use url::Url;

/// Hosts the fetcher may contact. Everything else is rejected before any
/// cache or network access.
pub const ALLOWED_HOSTS: &[&str] = &[
    "spec.c2pa.org",
    "c2pa.org",
    "api.github.com",
    "contentauthenticity.org",
    "docs.rs",
    "contentauth.github.io",
];

/// Parse a URL and reject it unless its host is on the allow-list.
pub fn ensure_allowed(url: &str, allowed: &[String]) -> Result<Url, Error> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidInput(format!("invalid URL {url}: {e}")))?;
    let host = parsed.host_str().unwrap_or_default();

    if allowed.iter().any(|a| a == host) {
        Ok(parsed)
    } else {
        Err(Error::BlockedHost(host.to_string()))
    }
}
