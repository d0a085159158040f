//! Tool handlers shared by the MCP server and the CLI.

pub mod buckets;
pub mod search;

use rmcp::schemars;
use serde::Deserialize;

/// Output layout for tool responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
