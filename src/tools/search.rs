//! Prefix search handler for finding documentation symbols.

use super::OutputFormat;
use crate::context::SearchContext;
use crate::search::{QueryResolver, ResolveOptions};
use crate::types::{SymbolEntry, SymbolKind};
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Leading characters of the symbol name
    pub query: String,
    /// Only return symbols of this kind
    #[serde(default)]
    pub kind: Option<SymbolKind>,
    /// Maximum number of results to return (default: server setting)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Response layout (default: text)
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Execute a prefix search against the loaded index.
pub fn handle_search(context: &SearchContext, request: SearchRequest) -> Result<String, String> {
    let limit = request.limit.unwrap_or_else(|| context.default_limit());
    if limit == 0 {
        return Err("Limit must be at least 1.".to_string());
    }
    let resolver = QueryResolver::new(context.store()).with_options(ResolveOptions {
        kind: request.kind,
        // One extra result tells us whether the list was cut short
        limit: Some(limit.saturating_add(1)),
    });

    let mut results = resolver
        .resolve(&request.query)
        .map_err(|_| "Search query is empty. Type at least one character.".to_string())?;
    let truncated = results.len() > limit;
    results.truncate(limit);

    match request.format.unwrap_or_default() {
        OutputFormat::Json => serde_json::to_string_pretty(&results)
            .map_err(|e| format!("Failed to serialize results: {}", e)),
        OutputFormat::Text if results.is_empty() => Ok(format_no_results(&request)),
        OutputFormat::Text => Ok(format_search_results(&results, &request.query, truncated)),
    }
}

fn format_no_results(request: &SearchRequest) -> String {
    let mut msg = format!("No symbols found starting with '{}'.\n\n", request.query);

    msg.push_str("Search tips:\n");
    msg.push_str("• Matching is by prefix: type the beginning of the name\n");
    msg.push_str("• Case does not matter: 'date' finds 'Date'\n");
    if request.query.contains("::") {
        msg.push_str("• Search by symbol name only, not by qualified path\n");
    }
    if let Some(kind) = request.kind {
        let _ = writeln!(msg, "• Results were limited to kind '{}'", kind);
    }

    msg
}

/// Format search results into a readable string output.
fn format_search_results(results: &[&SymbolEntry], query: &str, truncated: bool) -> String {
    let mut output = format!("Symbols starting with '{}':\n\n", query);

    for (idx, entry) in results.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. `{}` ({})",
            idx + 1,
            entry.display_name,
            entry.kind
        );
        if !entry.scope_label.is_empty() && entry.scope_label != entry.display_name {
            let _ = writeln!(output, "   in {}", entry.scope_label);
        }
        let _ = writeln!(output, "   → {}", entry.target_url);
    }

    if truncated {
        output.push_str("\n… more results available; raise the limit or refine the query\n");
    }

    output
}
