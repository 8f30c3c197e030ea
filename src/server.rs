//! MCP server implementation using rmcp.
//!
//! The tool set is data-driven (one tool per documented module), so this
//! implements `ServerHandler` by hand instead of using the static tool
//! macros: `list_tools` and `call_tool` consult the registry built from
//! the loaded tree.

use crate::error::{RegistryError, Result, ServerError};
use crate::services::{DocsProvider, ReleaseChart, RELEASE_CHART_URI};
use crate::tools::{ToolRegistry, CATALOG_TOOL, FIND_TOOL};
use rmcp::model::{
    AnnotateAble, CallToolRequestParam, CallToolResult, Content, GetPromptRequestParam,
    GetPromptResult, Implementation, ListPromptsResult, ListResourcesResult, ListToolsResult,
    PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
    PromptMessageRole, PromptsCapability, ProtocolVersion, RawResource, ReadResourceRequestParam,
    ReadResourceResult, ResourceContents, ResourcesCapability, ServerCapabilities, ServerInfo,
    Tool, ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Name of the API lookup prompt.
const LOOKUP_PROMPT: &str = "nodejs-api-lookup";

/// MCP server for Node.js core API documentation.
#[derive(Clone)]
pub struct NodeDocsServer {
    provider: Arc<DocsProvider>,
    releases: Arc<ReleaseChart>,
    /// Registry built lazily from the provider's tree on first use.
    /// Build failures are not memoized; a later request retries.
    registry: Arc<OnceCell<Arc<ToolRegistry>>>,
}

impl NodeDocsServer {
    #[must_use]
    pub fn new(provider: DocsProvider) -> Self {
        Self {
            provider: Arc::new(provider),
            releases: Arc::new(ReleaseChart::new()),
            registry: Arc::new(OnceCell::new()),
        }
    }

    /// Returns the tool registry, fetching the tree and building it on
    /// first call.
    async fn registry(&self) -> Result<Arc<ToolRegistry>> {
        let registry = self
            .registry
            .get_or_try_init(|| async {
                let tree = self.provider.tree().await?;
                Ok::<_, ServerError>(Arc::new(ToolRegistry::build(tree)))
            })
            .await?;
        Ok(Arc::clone(registry))
    }
}

fn schema_object(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

impl ServerHandler for NodeDocsServer {
    fn get_info(&self) -> ServerInfo {
        let instructions = format!(
            "nodedocs: Node.js core API documentation.\n\n\
             WORKFLOW:\n\
             1. {CATALOG_TOOL} -> list every module and its methods\n\
             2. per-module tools (fs, http, ...) -> full documentation, \
             optionally narrowed with 'class'/'method' substring filters\n\
             3. {FIND_TOOL} -> resolve a module when you only know an \
             approximate name\n\n\
             Documentation is fetched from nodejs.org once and cached for \
             the lifetime of this server."
        );

        let mut capabilities = ServerCapabilities::default();
        capabilities.prompts = Some(PromptsCapability {
            list_changed: Some(false),
        });
        capabilities.tools = Some(ToolsCapability {
            list_changed: Some(false),
        });
        capabilities.resources = Some(ResourcesCapability {
            subscribe: None,
            list_changed: Some(false),
        });

        let server_info = Implementation::new("nodedocs", env!("CARGO_PKG_VERSION"))
            .with_title("Node.js API Documentation");

        let mut info = ServerInfo::default();
        info.protocol_version = ProtocolVersion::default();
        info.capabilities = capabilities;
        info.server_info = server_info;
        info.instructions = Some(instructions);
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        let registry = self.registry().await.map_err(McpError::from)?;

        let tools = registry
            .entries()
            .iter()
            .map(|entry| {
                Tool::new(
                    entry.name.clone(),
                    entry.description.clone(),
                    Arc::new(schema_object(entry.input_schema())),
                )
            })
            .collect();

        Ok(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let registry = self.registry().await.map_err(McpError::from)?;

        match registry.invoke(&request.name, request.arguments.as_ref()) {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            // Unknown identifiers are protocol-level caller errors; domain
            // failures come back as failed tool calls with the message.
            Err(err @ ServerError::Registry(RegistryError::OperationNotFound { .. })) => {
                Err(McpError::from(err))
            }
            Err(err) => Ok(CallToolResult::error(vec![Content::text(err.to_string())])),
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            meta: None,
            next_cursor: None,
            prompts: vec![Prompt::new(
                LOOKUP_PROMPT,
                Some("Search up-to-date knowledge for Node.js modules API Documentation"),
                Some(vec![
                    PromptArgument::new("module")
                        .with_description("The name of the Node.js module to search for.")
                        .with_required(false),
                    PromptArgument::new("method")
                        .with_description("The name of the method or function to search for.")
                        .with_required(false),
                ]),
            )],
        })
    }

    async fn get_prompt(
        &self,
        GetPromptRequestParam {
            name, arguments, ..
        }: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        if name != LOOKUP_PROMPT {
            return Err(McpError::invalid_params(
                format!("Prompt '{name}' not found"),
                None,
            ));
        }

        let arg = |key: &str| {
            arguments
                .as_ref()
                .and_then(|a| a.get(key))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let text = if let Some(module) = arg("module") {
            format!(
                "Use the Node.js API Documentation tool to provide documentation \
                 for the module: {module}."
            )
        } else if let Some(method) = arg("method") {
            format!(
                "Use the Node.js API Documentation tool to provide documentation \
                 about the function or method: {method}."
            )
        } else {
            "Use the Node.js API Documentation tool to provide documentation about \
             core (built-in) Node.js modules and their methods"
                .to_string()
        };

        Ok(GetPromptResult::new(vec![PromptMessage::new(
            PromptMessageRole::User,
            PromptMessageContent::Text { text },
        )]))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        let mut chart = RawResource::new(RELEASE_CHART_URI, "Node.js Releases Schedule Chart");
        chart.description =
            Some("A chart showing the release schedule of Node.js versions.".to_string());
        chart.mime_type = Some("image/svg+xml".to_string());

        Ok(ListResourcesResult {
            meta: None,
            next_cursor: None,
            resources: vec![chart.no_annotation()],
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri, .. }: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        if uri != RELEASE_CHART_URI {
            return Err(McpError::resource_not_found(
                format!("Resource '{uri}' not found"),
                None,
            ));
        }

        tracing::info!(%uri, "Resource access");
        let svg = self
            .releases
            .svg()
            .await
            .map_err(|e| McpError::from(ServerError::from(e)))?;

        Ok(ReadResourceResult::new(vec![ResourceContents::text(
            svg, uri,
        )]))
    }
}
