//! list_examples tool implementation.
//!
//! Probes the conventional example directories of each SDK repository and
//! reports the first non-empty one per repository. Probing is best-effort:
//! a failed candidate is skipped, not fatal.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use c2pa_docs_client::{RepoEntry, RepoKey, github};

use crate::context::DocsContext;
use crate::tools::repo_contents::EntryOutput;

/// Candidate directory names, probed in order.
pub const EXAMPLE_DIRS: [&str; 4] = ["examples", "samples", "demo", "tests"];

/// Input parameters for list_examples tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListExamplesParams {
    /// rust, python, javascript, or all.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "all".into()
}

/// Example files found in one repository.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RepoExamples {
    /// Logical repository key.
    pub repo: String,
    /// Directory the files were found under.
    pub directory: String,
    pub files: Vec<EntryOutput>,
}

/// Output structure for list_examples tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListExamplesOutput {
    pub language: String,
    pub repositories: Vec<RepoExamples>,
}

/// SDK repositories searched for a language selector; anything unrecognized
/// falls back to all of them.
fn repos_for_language(language: &str) -> Vec<RepoKey> {
    match language {
        "rust" => vec![RepoKey::Rs],
        "python" => vec![RepoKey::Python],
        "javascript" => vec![RepoKey::Js],
        _ => vec![RepoKey::Rs, RepoKey::Python, RepoKey::Js],
    }
}

/// Probe each repository's candidate directories; first non-empty wins.
pub async fn collect_examples(ctx: &DocsContext, language: &str) -> Vec<RepoExamples> {
    let mut repositories = Vec::new();

    for repo in repos_for_language(language) {
        for dir in EXAMPLE_DIRS {
            match github::contents_at(&ctx.fetcher, &ctx.github_api_base, repo, dir).await {
                Ok(RepoEntry::Directory(listing)) if !listing.files.is_empty() => {
                    repositories.push(RepoExamples {
                        repo: repo.as_str().to_string(),
                        directory: dir.to_string(),
                        files: listing
                            .files
                            .into_iter()
                            .map(|e| EntryOutput { name: e.name, size: e.size })
                            .collect(),
                    });
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("skipping {}/{}: {}", repo.as_str(), dir, e);
                }
            }
        }
    }

    repositories
}

/// Implementation of the list_examples tool.
pub async fn examples_impl(ctx: &DocsContext, params: ListExamplesParams) -> Result<CallToolResult, McpError> {
    let repositories = collect_examples(ctx, &params.language).await;
    let output = ListExamplesOutput { language: params.language, repositories };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
