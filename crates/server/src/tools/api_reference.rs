//! get_api_reference tool implementation.
//!
//! Pure lookup: a fixed canonical documentation URL per SDK. No network.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use c2pa_docs_core::Error;

/// Input parameters for get_api_reference tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApiReferenceParams {
    /// rust, python, or javascript.
    pub library: String,
}

/// Output structure for get_api_reference tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApiReferenceOutput {
    pub library: String,
    pub url: String,
}

/// Canonical documentation URL for a library.
pub fn reference_url(library: &str) -> Result<&'static str, Error> {
    match library {
        "rust" => Ok("https://docs.rs/c2pa/latest/c2pa/"),
        "python" => Ok("https://contentauth.github.io/c2pa-python/"),
        "javascript" => Ok("https://contentauth.github.io/c2pa-js/"),
        other => Err(Error::UnknownLibrary(other.to_string())),
    }
}

/// Implementation of the get_api_reference tool.
pub fn reference_impl(params: ApiReferenceParams) -> Result<CallToolResult, McpError> {
    let url = reference_url(&params.library)?;
    let output = ApiReferenceOutput { library: params.library, url: url.to_string() };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
