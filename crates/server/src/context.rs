//! Shared state for all tool calls.

use c2pa_docs_client::{FetchClient, FetchConfig, SpecIndex, github};
use c2pa_docs_core::{AppConfig, Error};

/// Everything a tool call needs: the loaded configuration, the shared HTTP
/// client with its response cache, and the lazily built spec index.
///
/// Constructed once in `main` and shared behind an `Arc`. Dropping the
/// context releases the HTTP connection pool, on every exit path including
/// a failed startup.
pub struct DocsContext {
    pub config: AppConfig,
    pub fetcher: FetchClient,
    pub index: SpecIndex,
    /// GitHub API base; tests point this at a local mock.
    pub github_api_base: String,
}

impl DocsContext {
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            auth_token: config.github_token.clone(),
            cache_capacity: config.cache_capacity,
            ..Default::default()
        })?;

        Ok(Self {
            config,
            fetcher,
            index: SpecIndex::new(),
            github_api_base: github::GITHUB_API_BASE.to_string(),
        })
    }
}
