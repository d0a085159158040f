//! Query resolution: raw user input to an ordered list of index entries.

use super::index::IndexStore;
use super::normalize::{PartitionRule, normalize};
use crate::error::EmptyQueryError;
use crate::types::{SymbolEntry, SymbolKind};
use rmcp::schemars;
use serde::Deserialize;

/// Optional narrowing applied after matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
pub struct ResolveOptions {
    /// Only return entries of this kind
    pub kind: Option<SymbolKind>,
    /// Maximum number of entries to return, applied after ordering
    pub limit: Option<usize>,
}

/// Resolves queries against a borrowed [`IndexStore`].
///
/// Holds no state of its own; creating one per request is free.
#[derive(Debug, Clone, Copy)]
pub struct QueryResolver<'s> {
    store: &'s IndexStore,
    options: ResolveOptions,
}

impl<'s> QueryResolver<'s> {
    pub const fn new(store: &'s IndexStore) -> Self {
        Self {
            store,
            options: ResolveOptions {
                kind: None,
                limit: None,
            },
        }
    }

    pub const fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Prefix-match `raw_query` against every entry's normalized key.
    ///
    /// The query goes through the same [`normalize`] as the index, so `"distance_"` finds
    /// `distance_max` and `"deprecated "` finds `Deprecated List`. Only buckets that can
    /// hold keys with that prefix are scanned.
    ///
    /// Results are ordered by normalized key; entries sharing a key keep the order the
    /// generator listed them in (e.g. a class before its constructors). No match yields an
    /// empty list. A blank query is rejected with [`EmptyQueryError`].
    pub fn resolve(&self, raw_query: &str) -> Result<Vec<&'s SymbolEntry>, EmptyQueryError> {
        if raw_query.trim().is_empty() {
            return Err(EmptyQueryError);
        }
        let query = normalize(raw_query);

        let mut scanned = 0;
        let mut matches: Vec<&'s SymbolEntry> = Vec::new();
        for bucket in self
            .store
            .buckets()
            .filter(|bucket| PartitionRule::may_contain(bucket.key(), &query))
        {
            scanned += 1;
            matches.extend(
                bucket
                    .entries()
                    .iter()
                    .filter(|entry| entry.normalized_key.starts_with(&query))
                    .filter(|entry| self.options.kind.is_none_or(|kind| entry.kind == kind)),
            );
        }

        // Entries sharing a key always share a bucket, so a stable sort keeps their
        // generation order regardless of the order buckets were visited in
        matches.sort_by(|a, b| a.normalized_key.cmp(&b.normalized_key));

        if let Some(limit) = self.options.limit {
            matches.truncate(limit);
        }

        tracing::debug!(
            "Resolved '{}' (key '{}'): {} buckets scanned, {} matches",
            raw_query,
            query,
            scanned,
            matches.len()
        );

        Ok(matches)
    }
}

/// Resolve `raw_query` against `store` with no filtering. See [`QueryResolver::resolve`].
pub fn resolve<'s>(
    raw_query: &str,
    store: &'s IndexStore,
) -> Result<Vec<&'s SymbolEntry>, EmptyQueryError> {
    QueryResolver::new(store).resolve(raw_query)
}
