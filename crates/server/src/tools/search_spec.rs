//! search_spec tool implementation.
//!
//! Builds the spec index on first use, ranks its chunks against the query,
//! and returns the top matches with snippets and permalinks.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use c2pa_docs_client::{RankConfig, rank, snippet};
use c2pa_docs_core::Error;

use crate::context::DocsContext;

/// Input parameters for search_spec tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchSpecParams {
    /// Search terms.
    pub query: String,

    /// Optional section hint like "3.4"; matching sections are boosted.
    #[serde(default)]
    pub section: Option<String>,
}

/// One search result.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchHit {
    /// Section id, like "3.4".
    pub section: String,
    /// Heading title.
    pub title: String,
    /// Deep link into the specification document.
    pub permalink: String,
    /// Preview excerpt around the first query match.
    pub snippet: String,
}

/// Output structure for search_spec tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchSpecOutput {
    /// The query as searched.
    pub query: String,
    /// Matching sections, best first.
    pub hits: Vec<SearchHit>,
}

/// Rank the indexed spec against a query and derive the result hits.
pub async fn search_hits(ctx: &DocsContext, params: &SearchSpecParams) -> Result<Vec<SearchHit>, Error> {
    let chunks = ctx.index.ensure(&ctx.fetcher).await?;

    let rank_config = RankConfig::default();
    let ranked = rank(&params.query, params.section.as_deref(), chunks, &rank_config);

    Ok(ranked
        .into_iter()
        .map(|chunk| SearchHit {
            section: chunk.section.clone(),
            title: chunk.title.clone(),
            permalink: chunk.permalink.clone(),
            snippet: snippet(&chunk.text, &params.query, &rank_config),
        })
        .collect())
}

/// Implementation of the search_spec tool.
pub async fn search_impl(ctx: &DocsContext, params: SearchSpecParams) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".into()).into());
    }

    let hits = search_hits(ctx, &params).await?;
    tracing::debug!("search '{}' matched {} sections", params.query, hits.len());

    let output = SearchSpecOutput { query: params.query, hits };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
