//! Error handling types and utilities.

use std::path::PathBuf;
use std::time::Duration;

/// A specialized Result type for application-level operations (CLI, config, server startup).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the binary.
pub type Result<T> = anyhow::Result<T>;

/// Integrity violation found while constructing an [`IndexStore`](crate::IndexStore).
///
/// A load that produces this error never yields a store; there is no partial index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedIndexError {
    #[error("bucket '{bucket}', record {record}: missing display name")]
    MissingDisplayName { bucket: String, record: usize },

    #[error("bucket '{bucket}', record {record} ('{name}'): missing target URL")]
    MissingTarget {
        bucket: String,
        record: usize,
        name: String,
    },

    #[error("bucket '{bucket}', record {record} ('{name}'): has no targets")]
    NoTargets {
        bucket: String,
        record: usize,
        name: String,
    },

    #[error(
        "bucket '{bucket}', record {record}: key '{key}' does not match normalized name '{expected}'"
    )]
    KeyMismatch {
        bucket: String,
        record: usize,
        key: String,
        expected: String,
    },

    #[error("bucket '{bucket}': entry '{key}' belongs to bucket '{expected}'")]
    WrongBucket {
        bucket: String,
        key: String,
        expected: String,
    },

    #[error("bucket '{bucket}' appears more than once")]
    DuplicateBucket { bucket: String },

    #[error("bucket '{bucket}', record {record}: {reason}")]
    InvalidRecord {
        bucket: String,
        record: usize,
        reason: String,
    },

    #[error("invalid index layout: {0}")]
    InvalidLayout(String),
}

/// Returned by the resolver when asked to search for nothing.
///
/// Callers should treat an empty query as "show nothing" and avoid calling resolve at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search query is empty")]
pub struct EmptyQueryError;

/// Syntax error in a serialized index source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("invalid JSON index: {0}")]
    Json(String),

    #[error("invalid search script at byte {offset}: {message}")]
    Script { offset: usize, message: String },
}

/// Error returned when loading an index from disk fails.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: SourceError,
    },

    #[error("invalid records in {}: {source}", path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: MalformedIndexError,
    },

    #[error(transparent)]
    Malformed(#[from] MalformedIndexError),

    #[error("no search data found under {}", .0.display())]
    Empty(PathBuf),

    #[error("index load timed out after {0:?}")]
    Timeout(Duration),

    #[error("index load was cancelled")]
    Cancelled,

    #[error("index load task failed: {0}")]
    Task(String),
}
