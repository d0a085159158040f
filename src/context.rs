//! Shared state handed to every tool invocation.

use crate::search::IndexStore;
use std::sync::Arc;

/// Read-only search context.
///
/// Wraps the loaded index and request defaults. Cloning is cheap; the index itself is
/// never copied or mutated, so clones can be used from any task without locking.
#[derive(Debug, Clone)]
pub struct SearchContext {
    store: Arc<IndexStore>,
    default_limit: usize,
}

impl SearchContext {
    pub fn new(store: Arc<IndexStore>, default_limit: usize) -> Self {
        Self {
            store,
            default_limit,
        }
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    /// Result cap used when a request does not set one.
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }
}
