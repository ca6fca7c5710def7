//! Completion ledger for resumable sweeps.

use crate::AnnotationStore;
use depthsweep_core::{AnnotationKey, AnnotationRecord};
use depthsweep_error::DepthsweepResult;
use std::collections::HashSet;
use tracing::{info, instrument};

/// The annotations already stored for one partition when a run starts.
///
/// Skip decisions are made against this snapshot only; records produced
/// during the current run reach the next run through the store itself.
#[derive(Debug, Clone, Default)]
pub struct CompletionLedger {
    existing: Vec<AnnotationRecord>,
    done: HashSet<AnnotationKey>,
}

impl CompletionLedger {
    /// Load the ledger from a partition's store. A missing store is empty.
    #[instrument(skip(store), fields(path = %store.path().display()))]
    pub async fn load(store: &AnnotationStore) -> DepthsweepResult<Self> {
        let ledger = Self::from_records(store.load().await?);
        info!(completed = ledger.len(), "Loaded completion ledger");
        Ok(ledger)
    }

    /// Build a ledger from already loaded records.
    pub fn from_records(existing: Vec<AnnotationRecord>) -> Self {
        let done = existing.iter().map(AnnotationRecord::key).collect();
        Self { existing, done }
    }

    /// Whether `key` already has a stored annotation.
    pub fn already_done(&self, key: &AnnotationKey) -> bool {
        self.done.contains(key)
    }

    /// The stored records, in file order.
    pub fn existing(&self) -> &[AnnotationRecord] {
        &self.existing
    }

    /// Number of distinct completed keys.
    pub fn len(&self) -> usize {
        self.done.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }
}
