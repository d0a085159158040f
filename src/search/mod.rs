//! Prefix symbol search over a bucketed index.
//!
//! This module provides key normalization and partitioning, the immutable index store,
//! and query resolution.

// Module declarations
pub(crate) mod index;
pub(crate) mod normalize;
pub(crate) mod query;

// Public re-exports (used via lib.rs)
pub use index::{Bucket, IndexStore};
pub use normalize::{PartitionRule, normalize};
pub use query::{QueryResolver, ResolveOptions, resolve};
