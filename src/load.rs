//! Loading an [`IndexStore`] from generated search data.
//!
//! Loading is all-or-nothing: the store is only returned once every file has been read,
//! decoded and validated. A timed-out or cancelled load drops whatever was read so far.

use crate::error::LoadError;
use crate::search::{IndexStore, PartitionRule};
use crate::source::{self, RawBucket, SourceDecodeError, SourceFormat, discover_scripts};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Settings for a single load.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub partition: PartitionRule,
    /// Give up after this long; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            partition: PartitionRule::default(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Build a store from an in-memory blob handed over by the caller.
pub fn load_from_str(
    text: &str,
    format: SourceFormat,
    partition: PartitionRule,
) -> Result<IndexStore, LoadError> {
    let buckets = source::decode(format, text).map_err(|e| match e {
        SourceDecodeError::Syntax(source) => LoadError::Source {
            path: PathBuf::from("<memory>"),
            source,
        },
        SourceDecodeError::Shape(source) => LoadError::Malformed(source),
    })?;
    Ok(IndexStore::load(buckets, partition)?)
}

/// Load a store from a JSON bucket map, a single search script, or a directory of
/// `all_*.js` scripts.
///
/// Resolves to [`LoadError::Cancelled`] if `cancel` fires first and to
/// [`LoadError::Timeout`] if the configured timeout elapses.
pub async fn load_path(
    path: &Path,
    options: LoadOptions,
    cancel: &CancellationToken,
) -> Result<IndexStore, LoadError> {
    let start = Instant::now();
    tracing::info!("Loading search index from {}", path.display());

    let result = bounded(
        read_and_build(path.to_path_buf(), options.partition),
        options.timeout,
        cancel,
    )
    .await;

    match &result {
        Ok(store) => tracing::info!(
            "Loaded search index: {} buckets, {} entries in {:?}",
            store.bucket_count(),
            store.len(),
            start.elapsed()
        ),
        Err(e) => tracing::warn!("Search index load failed: {}", e),
    }
    result
}

/// Run `load` until it finishes, `cancel` fires, or `timeout` elapses.
async fn bounded<T>(
    load: impl Future<Output = Result<T, LoadError>>,
    timeout: Option<Duration>,
    cancel: &CancellationToken,
) -> Result<T, LoadError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(LoadError::Cancelled),
        result = async {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, load)
                    .await
                    .unwrap_or(Err(LoadError::Timeout(limit))),
                None => load.await,
            }
        } => result,
    }
}

async fn read_and_build(path: PathBuf, partition: PartitionRule) -> Result<IndexStore, LoadError> {
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;

    let files = if metadata.is_dir() {
        let dir = path.clone();
        let scripts = tokio::task::spawn_blocking(move || discover_scripts(&dir))
            .await
            .map_err(|e| LoadError::Task(e.to_string()))?;
        if scripts.is_empty() {
            return Err(LoadError::Empty(path));
        }
        scripts
    } else {
        vec![path]
    };

    let mut texts = Vec::with_capacity(files.len());
    for file in files {
        let text = tokio::fs::read_to_string(&file)
            .await
            .map_err(|source| LoadError::Io {
                path: file.clone(),
                source,
            })?;
        texts.push((file, text));
    }

    // Decoding and validation are CPU-bound
    tokio::task::spawn_blocking(move || build(texts, partition))
        .await
        .map_err(|e| LoadError::Task(e.to_string()))?
}

fn build(texts: Vec<(PathBuf, String)>, partition: PartitionRule) -> Result<IndexStore, LoadError> {
    let mut buckets: Vec<RawBucket> = Vec::new();
    for (path, text) in texts {
        match source::decode(SourceFormat::from_path(&path), &text) {
            Ok(decoded) => buckets.extend(decoded),
            Err(SourceDecodeError::Syntax(source)) => {
                return Err(LoadError::Source { path, source });
            }
            Err(SourceDecodeError::Shape(source)) => {
                return Err(LoadError::InvalidFile { path, source });
            }
        }
    }
    Ok(IndexStore::load(buckets, partition)?)
}
