//! MCP server handler backed by the tool registry.

use std::sync::Arc;

use rmcp::model as m;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;

use crate::registry::{ErasedTool, ToolRegistry};

/// MCP stdio server exposing every registered ZeroBounce tool.
///
/// Each call result carries the mapping twice: as pretty-printed JSON text for
/// display and as `structured_content`. Tool-level failures are ordinary results
/// with an `error` field; only unknown tools and undecodable arguments set
/// `is_error`.
pub struct ZeroBounceServer {
    registry: Arc<ToolRegistry>,
}

/// Implementation name reported during MCP initialization.
pub const SERVER_NAME: &str = "zerobounce-mcp";

impl ZeroBounceServer {
    pub const fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Published tool descriptors, sorted by name.
    pub fn tools(&self) -> Vec<m::Tool> {
        self.registry.iter().map(|t| describe(t.as_ref())).collect()
    }

    /// Runs a tool and wraps its mapping as an MCP call result.
    pub async fn invoke(&self, name: &str, arguments: Option<m::JsonObject>) -> m::CallToolResult {
        let args = Value::Object(arguments.unwrap_or_default());
        match self.registry.dispatch_json(name, args).await {
            Ok(mapping) => {
                let data = Value::Object(mapping);
                let text = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());
                m::CallToolResult {
                    content: vec![m::Content::text(text)],
                    structured_content: Some(data),
                    is_error: Some(false),
                    meta: None,
                }
            }
            Err(e) => m::CallToolResult::error(vec![m::Content::text(e.to_string())]),
        }
    }
}

fn describe(tool: &dyn ErasedTool) -> m::Tool {
    let schema_json =
        serde_json::to_value(tool.input_schema()).unwrap_or(serde_json::json!({"type": "object"}));
    m::Tool {
        name: tool.name().into(),
        title: Some(tool.name().to_string()),
        description: Some(tool.description().into()),
        input_schema: Arc::new(schema_json.as_object().cloned().unwrap_or_default()),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
    }
}

// Allow manual_async_fn because the trait signature uses `impl Future` return types
#[allow(clippy::manual_async_fn)]
impl ServerHandler for ZeroBounceServer {
    fn get_info(&self) -> m::ServerInfo {
        m::ServerInfo {
            server_info: m::Implementation {
                name: SERVER_NAME.to_string(),
                title: Some("ZeroBounce MCP".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
            capabilities: m::ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Email validation tools backed by the ZeroBounce API. \
                 Use guess_format rather than domain_search."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListToolsResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::ListToolsResult {
                tools: self.tools(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        req: m::CallToolRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::CallToolResult, m::ErrorData>> + Send + '_
    {
        async move { Ok(self.invoke(&req.name, req.arguments).await) }
    }
}
