//! Host-restricted HTTP fetch with retries and response caching.
//!
//! ### Pipeline
//! - Allow-list check on the URL host, before cache or network access.
//! - LRU cache lookup keyed by (url, accept hint).
//! - Bounded retry loop: retryable statuses and transport failures back off
//!   linearly; anything else fails fast.
//! - Successful bodies are cached unconditionally; errors never are.
//!
//! ### Shared session
//! One client is created at startup and shared across all tool calls. The
//! underlying connection pool is released on drop, on every exit path.

pub mod hosts;

use std::time::Duration;

use c2pa_docs_core::{Error, LruCache, compute_cache_key};
use reqwest::{Client, header};
use tokio::sync::Mutex;

pub use hosts::{ALLOWED_HOSTS, ensure_allowed};

/// Statuses worth retrying: rate limiting and transient upstream failures.
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Total attempts when the failure is a retryable HTTP status.
const MAX_STATUS_ATTEMPTS: u32 = 4;

/// Total attempts when the failure is transport-level.
const MAX_TRANSPORT_ATTEMPTS: u32 = 3;

/// Linear backoff step: attempt n sleeps n times this long.
const BACKOFF_STEP: Duration = Duration::from_millis(500);

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string.
    pub user_agent: String,

    /// Accept header sent when a call does not override it.
    pub accept_default: String,

    /// Total request timeout (default: 30s).
    pub timeout: Duration,

    /// GitHub access token, sent as `Authorization: token ...` when set.
    pub auth_token: Option<String>,

    /// Response cache capacity in entries.
    pub cache_capacity: usize,

    /// Hosts the client may contact (default: [`ALLOWED_HOSTS`]).
    pub allowed_hosts: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "c2pa-docs-mcp/0.1 (+https://github.com/contentauth)".to_string(),
            accept_default: "application/json, text/html;q=0.9,*/*;q=0.8".to_string(),
            timeout: Duration::from_millis(30_000),
            auth_token: None,
            cache_capacity: 64,
            allowed_hosts: ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

/// Outcome of a single request attempt, before retry policy is applied.
enum AttemptError {
    Status(u16),
    Transport(String),
}

/// Shared HTTP client with host checks, caching, and bounded retries.
pub struct FetchClient {
    http: Client,
    cache: Mutex<LruCache<String>>,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    ///
    /// Builds the one long-lived reqwest client with fixed default headers;
    /// the access token, when present, is attached as a sensitive
    /// `Authorization` header so it never shows up in debug output.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let mut headers = header::HeaderMap::new();

        let accept = header::HeaderValue::from_str(&config.accept_default)
            .map_err(|e| Error::InvalidInput(format!("invalid accept default: {e}")))?;
        headers.insert(header::ACCEPT, accept);

        if let Some(token) = &config.auth_token {
            let mut value = header::HeaderValue::from_str(&format!("token {token}"))
                .map_err(|_| Error::InvalidInput("github token contains invalid header characters".into()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .default_headers(headers)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;

        let cache = Mutex::new(LruCache::new(config.cache_capacity));

        Ok(Self { http, cache, config })
    }

    /// Fetch a URL as text, consulting the cache first.
    ///
    /// `accept` overrides the default Accept header and participates in the
    /// cache key, so HTML and JSON views of the same URL do not collide.
    pub async fn get(&self, url: &str, accept: Option<&str>) -> Result<String, Error> {
        ensure_allowed(url, &self.config.allowed_hosts)?;

        let key = compute_cache_key(url, accept.unwrap_or_default());
        if let Some(body) = self.cache.lock().await.get(&key) {
            tracing::debug!("cache hit for {}", url);
            return Ok(body);
        }

        let body = self.get_with_retry(url, accept).await?;
        self.cache.lock().await.put(key, body.clone());
        Ok(body)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Number of cached responses, for diagnostics.
    pub async fn cached_responses(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn get_with_retry(&self, url: &str, accept: Option<&str>) -> Result<String, Error> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.attempt(url, accept).await {
                Ok(body) => {
                    tracing::debug!("fetched {} ({} bytes, attempt {})", url, body.len(), attempt);
                    return Ok(body);
                }
                Err(AttemptError::Status(status)) => {
                    if RETRYABLE_STATUSES.contains(&status) && attempt < MAX_STATUS_ATTEMPTS {
                        self.backoff(attempt, url, &format!("status {status}")).await;
                        continue;
                    }
                    return Err(Error::HttpStatus { status, url: url.to_string() });
                }
                Err(AttemptError::Transport(detail)) => {
                    if attempt < MAX_TRANSPORT_ATTEMPTS {
                        self.backoff(attempt, url, &detail).await;
                        continue;
                    }
                    return Err(Error::Transport(detail));
                }
            }
        }
    }

    /// One request/response cycle; classification only, no retry policy.
    async fn attempt(&self, url: &str, accept: Option<&str>) -> Result<String, AttemptError> {
        let mut request = self.http.get(url);
        if let Some(accept) = accept {
            request = request.header(header::ACCEPT, accept);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))
    }

    async fn backoff(&self, attempt: u32, url: &str, reason: &str) {
        let delay = BACKOFF_STEP * attempt;
        tracing::debug!("retrying {} in {:?} after attempt {}: {}", url, delay, attempt, reason);
        tokio::time::sleep(delay).await;
    }
}
