//! MCP server handler implementation.
//!
//! This module defines the main server handler that routes tool calls to the
//! appropriate implementations. Every failure crossing a tool boundary is
//! rendered as a textual error result rather than a protocol-level error,
//! with the configured credential redacted from the message first.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult, PaginatedRequestParam,
        ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

use c2pa_docs_core::redact_secret;

use crate::context::DocsContext;
use crate::tools::{api_reference, list_examples, repo_contents, search_spec};

/// The main MCP server handler for c2pa-docs.
#[derive(Clone)]
pub struct DocsServer {
    ctx: Arc<DocsContext>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl DocsServer {
    /// Create a new server handler around the shared context.
    pub fn new(ctx: Arc<DocsContext>) -> Self {
        Self { ctx, tool_router: Self::tool_router() }
    }

    fn render_error(&self, err: McpError) -> CallToolResult {
        let message = redact_secret(&err.message, self.ctx.config.github_token.as_deref());
        CallToolResult::error(vec![Content::text(format!("Error: {message}"))])
    }

    /// Search the indexed specification.
    #[tool(description = "Search the C2PA specification; returns up to 5 matching sections with permalinks and snippets.")]
    async fn search_spec(&self, params: Parameters<search_spec::SearchSpecParams>) -> Result<CallToolResult, McpError> {
        Ok(search_spec::search_impl(&self.ctx, params.0)
            .await
            .unwrap_or_else(|e| self.render_error(e)))
    }

    /// Fetch repository contents.
    #[tool(description = "Fetch a file or list a directory from the official contentauth GitHub repositories.")]
    async fn get_repo_path(
        &self, params: Parameters<repo_contents::RepoPathParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(repo_contents::contents_impl(&self.ctx, params.0)
            .await
            .unwrap_or_else(|e| self.render_error(e)))
    }

    /// List example files across the SDK repositories.
    #[tool(description = "List example files across the c2pa language SDK repositories.")]
    async fn list_examples(
        &self, params: Parameters<list_examples::ListExamplesParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(list_examples::examples_impl(&self.ctx, params.0)
            .await
            .unwrap_or_else(|e| self.render_error(e)))
    }

    /// Resolve a canonical API reference URL.
    #[tool(description = "Return the canonical API reference URL for a c2pa SDK (rust, python, javascript).")]
    async fn get_api_reference(
        &self, params: Parameters<api_reference::ApiReferenceParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(api_reference::reference_impl(params.0).unwrap_or_else(|e| self.render_error(e)))
    }
}

impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "c2pa-docs".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
