//! get_repo_path tool implementation.
//!
//! Resolves a logical repository key and path to a directory listing or a
//! decoded file through the GitHub contents API.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use c2pa_docs_client::{RepoEntry, RepoKey, github};
use c2pa_docs_core::Error;

use crate::context::DocsContext;

/// Input parameters for get_repo_path tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RepoPathParams {
    /// One of spec, rs, python, js.
    pub repo: String,

    /// Path within the repository.
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "README.md".into()
}

/// Name and size of one directory entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EntryOutput {
    pub name: String,
    /// Size in bytes when the API reports one.
    pub size: Option<u64>,
}

/// Output structure for get_repo_path tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RepoPathOutput {
    Directory { repo: String, path: String, files: Vec<EntryOutput>, dirs: Vec<EntryOutput> },
    File { repo: String, path: String, content: String },
}

/// Resolve a repository path into its typed output.
pub async fn fetch_path(ctx: &DocsContext, params: &RepoPathParams) -> Result<RepoPathOutput, Error> {
    let repo = RepoKey::parse(&params.repo)?;
    let entry = github::contents_at(&ctx.fetcher, &ctx.github_api_base, repo, &params.path).await?;

    Ok(match entry {
        RepoEntry::Directory(listing) => RepoPathOutput::Directory {
            repo: repo.as_str().to_string(),
            path: params.path.clone(),
            files: listing
                .files
                .into_iter()
                .map(|e| EntryOutput { name: e.name, size: e.size })
                .collect(),
            dirs: listing
                .dirs
                .into_iter()
                .map(|e| EntryOutput { name: e.name, size: e.size })
                .collect(),
        },
        RepoEntry::File(file) => RepoPathOutput::File {
            repo: repo.as_str().to_string(),
            path: params.path.clone(),
            content: file.text,
        },
    })
}

/// Implementation of the get_repo_path tool.
pub async fn contents_impl(ctx: &DocsContext, params: RepoPathParams) -> Result<CallToolResult, McpError> {
    let output = fetch_path(ctx, &params).await?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
