//! MCP tool handlers for the documentation search server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::domain::Theme;
use crate::error::SearchError;
use crate::observability::MetricsTracker;
use crate::preferences::PreferenceStore;
use crate::source::PageSource;
use crate::tools::{PageSearchParams, PreferenceTools, SearchTools, UpdatePreferencesParams};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes in-page search over a documentation site.
#[derive(Clone)]
pub struct DocSearchMcpServer {
    search_tools: SearchTools,
    preference_tools: PreferenceTools,
    metrics: MetricsTracker,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for DocSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "docsite-search".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("In-page search for a rendered documentation site - search a page's headings and API definitions by category, read its outline and related items, and manage reader preferences.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct SearchPageToolParams {
    /// Site-relative page path, e.g. `api/circle.html`
    path: String,
    query: String,
    /// One of all, classes, functions, modules, examples
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListPageEntriesParams {
    path: String,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TableOfContentsParams {
    path: String,
    /// Minimum heading count for an outline to exist
    #[serde(default)]
    min_headings: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RelatedItemsParams {
    path: String,
    /// Label of the entry to find relatives for
    label: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdatePreferencesToolParams {
    /// light or dark
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    toggle_theme: Option<bool>,
    #[serde(default)]
    toc_visible: Option<bool>,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

// Caller mistakes are reported as invalid params, fetch failures as internal errors
fn search_error(e: SearchError) -> McpError {
    match e {
        SearchError::InvalidCategory(_) | SearchError::InvalidParameters(_) => invalid_params(e),
        SearchError::Fetch(_) => to_mcp_error(e),
    }
}

fn json_result(value: serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&value).map_err(to_mcp_error)?,
    )]))
}

#[tool_router]
impl DocSearchMcpServer {
    /// Create a new documentation search server.
    pub fn new(
        source: Arc<dyn PageSource>,
        store: Arc<dyn PreferenceStore>,
        cache_ttl_secs: u64,
        toc_min_headings: usize,
        metrics: MetricsTracker,
    ) -> Self {
        Self::with_tools(
            SearchTools::new(source, cache_ttl_secs, toc_min_headings, metrics.clone()),
            PreferenceTools::new(store),
            metrics,
        )
    }

    /// Create a server around already constructed tools.
    pub fn with_tools(
        search_tools: SearchTools,
        preference_tools: PreferenceTools,
        metrics: MetricsTracker,
    ) -> Self {
        Self {
            search_tools,
            preference_tools,
            metrics,
            tool_router: Self::tool_router(),
        }
    }

    pub fn search_tools(&self) -> &SearchTools {
        &self.search_tools
    }

    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    /// List every page of the site.
    #[tool(description = "List the site-relative paths of every page in the documentation site.")]
    async fn list_pages(
        &self,
    ) -> Result<CallToolResult, McpError> {
        let pages = self.search_tools.list_pages().await.map_err(search_error)?;

        json_result(serde_json::json!({
            "page_count": pages.len(),
            "pages": pages,
        }))
    }

    /// Search one page's headings and API definitions.
    #[tool(
        description = "Search one documentation page for headings, classes, functions and examples whose label contains the query (case-insensitive). Queries under 2 characters return nothing. At most 10 results, in page order, optionally narrowed to a category: all, classes, functions, modules, examples."
    )]
    async fn search_page(
        &self,
        params: Parameters<SearchPageToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .search_tools
            .search_page(PageSearchParams {
                path: params.path,
                query: params.query.clone(),
                category: params.category,
            })
            .await
            .map_err(search_error)?;

        json_result(serde_json::json!({
            "page": response.path,
            "title": response.title,
            "query": params.query,
            "category": response.category,
            "result_count": response.hits.len(),
            "index_size": response.index_size,
            "from_cache": response.from_cache,
            "results": response.hits.iter().map(|hit| {
                serde_json::json!({
                    "text": hit.text,
                    "category": hit.category,
                    "highlighted": hit.highlighted,
                    "href": hit.navigation.href(),
                })
            }).collect::<Vec<_>>(),
        }))
    }

    /// List a page's index entries.
    #[tool(
        description = "List every searchable entry of a documentation page in page order, optionally narrowed to a category. Entries without an anchor are listed with a null href."
    )]
    async fn list_page_entries(
        &self,
        params: Parameters<ListPageEntriesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let entries = self
            .search_tools
            .list_entries(&params.path, params.category.as_deref())
            .await
            .map_err(search_error)?;

        json_result(serde_json::json!({
            "page": params.path,
            "entry_count": entries.len(),
            "entries": entries.iter().map(|entry| {
                serde_json::json!({
                    "text": entry.text,
                    "category": entry.category,
                    "anchor": entry.anchor,
                    "href": entry.navigation().href(),
                })
            }).collect::<Vec<_>>(),
        }))
    }

    /// Outline of a page.
    #[tool(
        description = "Get the table of contents (h1-h4 headings) of a documentation page. Pages with fewer headings than the threshold (default 3) have no table of contents."
    )]
    async fn get_table_of_contents(
        &self,
        params: Parameters<TableOfContentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let toc = self
            .search_tools
            .table_of_contents(&params.path, params.min_headings)
            .await
            .map_err(search_error)?;

        json_result(serde_json::json!({
            "page": params.path,
            "has_table_of_contents": toc.is_some(),
            "items": toc.map(|t| t.items).unwrap_or_default(),
        }))
    }

    /// Entries related to a given label.
    #[tool(
        description = "Suggest up to 5 entries of a documentation page that share a name fragment with the given label. Best effort; an empty list is a normal answer."
    )]
    async fn get_related_items(
        &self,
        params: Parameters<RelatedItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let related = self
            .search_tools
            .related_items(&params.path, &params.label)
            .await
            .map_err(search_error)?;

        json_result(serde_json::json!({
            "page": params.path,
            "label": params.label,
            "related": related.iter().map(|entry| {
                serde_json::json!({
                    "text": entry.text,
                    "category": entry.category,
                    "href": entry.navigation().href(),
                })
            }).collect::<Vec<_>>(),
        }))
    }

    /// Read reader preferences.
    #[tool(description = "Get the stored reader preferences (theme and table-of-contents visibility).")]
    async fn get_preferences(
        &self,
    ) -> Result<CallToolResult, McpError> {
        json_result(serde_json::json!(self.preference_tools.get()))
    }

    /// Change reader preferences.
    #[tool(
        description = "Update the stored reader preferences. Set theme to light or dark, or toggle_theme to flip it; set toc_visible to show or hide the table of contents."
    )]
    async fn update_preferences(
        &self,
        params: Parameters<UpdatePreferencesToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let theme = params
            .theme
            .as_deref()
            .map(str::parse::<Theme>)
            .transpose()
            .map_err(invalid_params)?;

        let prefs = self
            .preference_tools
            .update(UpdatePreferencesParams {
                theme,
                toggle_theme: params.toggle_theme.unwrap_or(false),
                toc_visible: params.toc_visible,
            })
            .map_err(to_mcp_error)?;

        json_result(serde_json::json!(prefs))
    }
}
