//! MCP server exposing the symbol index to external UIs and agents.

use crate::context::SearchContext;
use crate::tools::buckets::{
    BucketEntriesRequest, ListBucketsRequest, handle_bucket_entries, handle_list_buckets,
};
use crate::tools::search::{SearchRequest, handle_search};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP Server for documentation symbol lookups
#[derive(Clone)]
pub struct SymbolServer {
    /// Loaded index and request defaults
    context: SearchContext,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for SymbolServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolServer")
            .field("context", &self.context)
            .finish()
    }
}

#[tool_router]
impl SymbolServer {
    /// Create a server over an already loaded index.
    pub fn new(context: SearchContext) -> Self {
        Self {
            context,
            tool_router: Self::tool_router(),
        }
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    #[tool(
        description = "Find documentation symbols (types, members, namespaces, pages) whose name starts with the query. Case-insensitive prefix match; results are sorted by name, with same-named symbols in documentation order.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search_symbols(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.context, request)
    }

    #[tool(
        description = "List the buckets of the symbol index with their entry counts. Useful for building alphabetical index pages.",
        input_schema = inline_schema_for_type::<ListBucketsRequest>()
    )]
    async fn list_buckets(
        &self,
        Parameters(request): Parameters<ListBucketsRequest>,
    ) -> std::result::Result<String, String> {
        handle_list_buckets(&self.context, request)
    }

    #[tool(
        description = "List every symbol in one bucket of the index, in documentation order.",
        input_schema = inline_schema_for_type::<BucketEntriesRequest>()
    )]
    async fn bucket_entries(
        &self,
        Parameters(request): Parameters<BucketEntriesRequest>,
    ) -> std::result::Result<String, String> {
        handle_bucket_entries(&self.context, request)
    }
}

#[tool_handler]
impl ServerHandler for SymbolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(format!(
                "docsym: prefix search over a generated documentation index \
                 ({} symbols in {} buckets). Use search_symbols with the first letters of a \
                 name; use list_buckets and bucket_entries to enumerate the index.",
                self.context.store().len(),
                self.context.store().bucket_count()
            ))
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// to generate inline enum definitions instead of $ref patterns. This ensures MCP Inspector
/// displays enums as dropdown widgets rather than raw JSON input fields.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
