//! The immutable symbol index: entries partitioned into prefix buckets.

use super::normalize::{PartitionRule, normalize};
use crate::error::MalformedIndexError;
use crate::source::{RawBucket, RawRecord};
use crate::types::{SymbolEntry, SymbolKind};
use ahash::AHashMap;

/// All entries sharing a partition key, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    key: String,
    entries: Vec<SymbolEntry>,
}

impl Bucket {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Entries in generation order (not sorted).
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The complete symbol dataset.
///
/// Built once by [`IndexStore::load`] and never mutated afterwards, so a shared reference
/// (or an `Arc`) can serve any number of concurrent queries.
#[derive(Debug, Clone)]
pub struct IndexStore {
    buckets: AHashMap<String, Bucket>,
    partition: PartitionRule,
    entry_count: usize,
}

impl IndexStore {
    /// Validate raw buckets and build the store.
    ///
    /// Every record target becomes one [`SymbolEntry`]; entries sharing a name are all kept.
    /// Fails without building anything if a record lacks a display name or a target URL,
    /// if a precomputed key disagrees with [`normalize`], if an entry does not partition to
    /// the bucket it was listed under, or if a bucket key repeats.
    pub fn load(
        raw: impl IntoIterator<Item = RawBucket>,
        partition: PartitionRule,
    ) -> Result<Self, MalformedIndexError> {
        let mut buckets: AHashMap<String, Bucket> = AHashMap::new();
        let mut entry_count = 0;

        for raw_bucket in raw {
            for bucket in build_buckets(raw_bucket, partition)? {
                if buckets.contains_key(&bucket.key) {
                    return Err(MalformedIndexError::DuplicateBucket { bucket: bucket.key });
                }
                entry_count += bucket.entries.len();
                buckets.insert(bucket.key.clone(), bucket);
            }
        }

        tracing::debug!(
            "Validated index: {} buckets, {} entries",
            buckets.len(),
            entry_count
        );

        Ok(Self {
            buckets,
            partition,
            entry_count,
        })
    }

    /// The partition rule entries were bucketed with; queries must use the same one.
    pub const fn partition(&self) -> PartitionRule {
        self.partition
    }

    /// The bucket stored under exactly `key`, if any.
    pub fn bucket_for(&self, key: &str) -> Option<&Bucket> {
        self.buckets.get(key)
    }

    /// Every bucket key, in no particular order.
    pub fn all_bucket_keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Entries of a bucket in generation order; empty for an unknown key.
    pub fn entries_in(&self, key: &str) -> &[SymbolEntry] {
        match self.bucket_for(key) {
            Some(bucket) => bucket.entries(),
            None => &[],
        }
    }

    /// Every bucket, in no particular order.
    pub fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.values()
    }

    /// Every entry, bucket by bucket.
    pub fn entries(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.buckets.values().flat_map(|bucket| bucket.entries.iter())
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}

/// Flatten and validate one raw bucket.
///
/// A named bucket must hold only entries of its own partition. An unnamed one (the
/// generator writes one script per leading character) is split by partition, so any
/// partition width works on script sources; generation order is kept within each part.
fn build_buckets(
    raw: RawBucket,
    partition: PartitionRule,
) -> Result<Vec<Bucket>, MalformedIndexError> {
    let label = raw.key.clone().unwrap_or_else(|| "<unnamed>".to_string());
    let mut entries = Vec::with_capacity(raw.records.len());

    for (idx, record) in raw.records.into_iter().enumerate() {
        flatten_record(&label, idx, record, &mut entries)?;
    }

    let Some(key) = raw.key else {
        return Ok(split_by_partition(entries, partition));
    };

    if let Some(stray) = entries
        .iter()
        .find(|entry| partition.bucket_key(&entry.normalized_key) != key)
    {
        let err = MalformedIndexError::WrongBucket {
            bucket: key,
            key: stray.normalized_key.clone(),
            expected: partition.bucket_key(&stray.normalized_key).to_string(),
        };
        tracing::warn!("Rejecting index: {}", err);
        return Err(err);
    }

    Ok(vec![Bucket { key, entries }])
}

fn split_by_partition(entries: Vec<SymbolEntry>, partition: PartitionRule) -> Vec<Bucket> {
    let mut positions: AHashMap<String, usize> = AHashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();

    for entry in entries {
        let key = partition.bucket_key(&entry.normalized_key);
        let pos = match positions.get(key) {
            Some(&pos) => pos,
            None => {
                positions.insert(key.to_string(), buckets.len());
                buckets.push(Bucket {
                    key: key.to_string(),
                    entries: Vec::new(),
                });
                buckets.len() - 1
            }
        };
        buckets[pos].entries.push(entry);
    }

    buckets
}

fn flatten_record(
    bucket: &str,
    idx: usize,
    record: RawRecord,
    out: &mut Vec<SymbolEntry>,
) -> Result<(), MalformedIndexError> {
    if record.display_name.is_empty() {
        return Err(MalformedIndexError::MissingDisplayName {
            bucket: bucket.to_string(),
            record: idx,
        });
    }
    if record.targets.is_empty() {
        return Err(MalformedIndexError::NoTargets {
            bucket: bucket.to_string(),
            record: idx,
            name: record.display_name,
        });
    }

    let normalized_key = normalize(&record.display_name);
    if let Some(key) = record.key
        && key != normalized_key
    {
        return Err(MalformedIndexError::KeyMismatch {
            bucket: bucket.to_string(),
            record: idx,
            key,
            expected: normalized_key,
        });
    }

    for target in record.targets {
        if target.url.is_empty() {
            return Err(MalformedIndexError::MissingTarget {
                bucket: bucket.to_string(),
                record: idx,
                name: record.display_name,
            });
        }
        out.push(SymbolEntry {
            display_name: record.display_name.clone(),
            normalized_key: normalized_key.clone(),
            kind: SymbolKind::infer(&target.scope, &target.url),
            scope_label: target.scope,
            target_url: target.url,
        });
    }

    Ok(())
}
