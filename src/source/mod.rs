//! Decoders for the documentation generator's search data.
//!
//! The generator emits one of two layouts:
//! - a JSON object mapping bucket keys to record lists ([`json`])
//! - one `var searchData=[...];` script per bucket ([`script`]), usually named `all_<n>.js`
//!
//! Both decode into [`RawBucket`] values. Record shapes are only checked structurally here;
//! integrity checks (empty names, missing URLs, bucket membership) happen when the
//! [`IndexStore`](crate::IndexStore) is built, so every source goes through the same gate.

pub mod discover;
pub mod json;
pub mod records;
pub mod script;

pub use discover::discover_scripts;

use crate::error::SourceError;
use std::path::Path;

/// One navigation target listed under a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTarget {
    pub url: String,
    pub scope: String,
}

/// One name with every target the generator listed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Precomputed normalized key, when the source carries one
    pub key: Option<String>,
    pub display_name: String,
    pub targets: Vec<RawTarget>,
}

/// Records sharing a partition, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBucket {
    /// Bucket key; `None` when the source does not name it (script files) and the key
    /// must be derived from the records
    pub key: Option<String>,
    pub records: Vec<RawRecord>,
}

/// Serialized layouts understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Script,
}

impl SourceFormat {
    /// Pick a format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("js") => Self::Script,
            _ => Self::Json,
        }
    }
}

/// Decode a complete source text into buckets.
pub fn decode(format: SourceFormat, text: &str) -> Result<Vec<RawBucket>, SourceDecodeError> {
    match format {
        SourceFormat::Json => json::decode(text),
        SourceFormat::Script => script::decode(text).map(|bucket| vec![bucket]),
    }
}

/// Failure to turn source text into raw buckets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceDecodeError {
    #[error(transparent)]
    Syntax(#[from] SourceError),

    #[error(transparent)]
    Shape(#[from] crate::error::MalformedIndexError),
}
