//! Enumeration handlers: bucket listing and per-bucket entry dumps.
//!
//! These back alphabetical index pages and sitemaps, so output is sorted even though the
//! store itself keeps no bucket order.

use super::OutputFormat;
use crate::context::SearchContext;
use crate::search::{Bucket, normalize};
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListBucketsRequest {
    /// Response layout (default: text)
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BucketEntriesRequest {
    /// Bucket key as listed by list_buckets, or the leading character(s) of a name
    pub bucket: String,
    /// Response layout (default: text)
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
struct BucketSummary<'a> {
    key: &'a str,
    entries: usize,
}

/// List every bucket key with its entry count, sorted by key.
pub fn handle_list_buckets(
    context: &SearchContext,
    request: ListBucketsRequest,
) -> Result<String, String> {
    let store = context.store();
    let mut buckets: Vec<&Bucket> = store.buckets().collect();
    buckets.sort_by(|a, b| a.key().cmp(b.key()));

    if request.format.unwrap_or_default() == OutputFormat::Json {
        let summaries: Vec<_> = buckets
            .iter()
            .map(|bucket| BucketSummary {
                key: bucket.key(),
                entries: bucket.len(),
            })
            .collect();
        return serde_json::to_string_pretty(&summaries)
            .map_err(|e| format!("Failed to serialize buckets: {}", e));
    }

    let mut output = format!(
        "Search index: {} buckets, {} entries\n\n",
        store.bucket_count(),
        store.len()
    );
    for bucket in buckets {
        let _ = writeln!(output, "  • {} ({})", bucket.key(), bucket.len());
    }
    Ok(output)
}

/// List the entries of one bucket in generation order.
pub fn handle_bucket_entries(
    context: &SearchContext,
    request: BucketEntriesRequest,
) -> Result<String, String> {
    let store = context.store();
    let bucket = store
        .bucket_for(&request.bucket)
        .or_else(|| {
            let normalized = normalize(&request.bucket);
            store.bucket_for(store.partition().bucket_key(&normalized))
        })
        .ok_or_else(|| format!("No bucket '{}' in the search index", request.bucket))?;

    if request.format.unwrap_or_default() == OutputFormat::Json {
        return serde_json::to_string_pretty(bucket.entries())
            .map_err(|e| format!("Failed to serialize entries: {}", e));
    }

    let mut output = format!("Bucket '{}' ({} entries):\n\n", bucket.key(), bucket.len());
    for entry in bucket.entries() {
        let _ = writeln!(output, "  • {} → {}", entry, entry.target_url);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{IndexStore, PartitionRule};
    use crate::source::{RawBucket, RawRecord, RawTarget};
    use assert2::{check, let_assert};
    use std::sync::Arc;

    fn context() -> SearchContext {
        let bucket = |key: &str, name: &str, url: &str| RawBucket {
            key: Some(key.to_string()),
            records: vec![RawRecord {
                key: None,
                display_name: name.to_string(),
                targets: vec![RawTarget {
                    url: url.to_string(),
                    scope: String::new(),
                }],
            }],
        };
        let store = IndexStore::load(
            [
                bucket("e", "Euler", "euler.html"),
                bucket("d", "Deprecated List", "deprecated.html"),
                bucket("_7e", "~Date", "date.html#a01"),
            ],
            PartitionRule::default(),
        )
        .unwrap();
        SearchContext::new(Arc::new(store), 25)
    }

    #[test]
    fn test_list_buckets_sorted() {
        let output = handle_list_buckets(&context(), ListBucketsRequest::default()).unwrap();
        check!(output.starts_with("Search index: 3 buckets, 3 entries"));
        let underscore = output.find("• _7e").unwrap();
        let d = output.find("• d").unwrap();
        let e = output.find("• e").unwrap();
        check!(underscore < d);
        check!(d < e);
    }

    #[test]
    fn test_list_buckets_json() {
        let output = handle_list_buckets(
            &context(),
            ListBucketsRequest {
                format: Some(OutputFormat::Json),
            },
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        check!(value[1]["key"] == "d");
        check!(value[1]["entries"] == 1);
    }

    #[test]
    fn test_bucket_entries_accepts_raw_prefix() {
        let by_key = handle_bucket_entries(
            &context(),
            BucketEntriesRequest {
                bucket: "_7e".to_string(),
                format: None,
            },
        )
        .unwrap();
        let by_prefix = handle_bucket_entries(
            &context(),
            BucketEntriesRequest {
                bucket: "~".to_string(),
                format: None,
            },
        )
        .unwrap();
        check!(by_key == by_prefix);
        check!(by_key.contains("~Date"));
    }

    #[test]
    fn test_unknown_bucket() {
        let_assert!(
            Err(message) = handle_bucket_entries(
                &context(),
                BucketEntriesRequest {
                    bucket: "q".to_string(),
                    format: None,
                },
            )
        );
        check!(message.contains("No bucket 'q'"));
    }
}
