//! Outcome counts of a sweep.

use depthsweep_storage::Partition;
use std::path::PathBuf;

/// Outcome of one (model, temperature) partition.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionReport {
    /// The partition swept
    pub partition: Partition,
    /// Store the partition was written to
    pub path: PathBuf,
    /// Keys annotated in this run
    pub annotated: usize,
    /// Keys already stored and not re-annotated
    pub skipped: usize,
    /// Keys whose annotation failed in this run
    pub failed: usize,
}

impl PartitionReport {
    pub(crate) fn new(partition: Partition, path: PathBuf) -> Self {
        Self {
            partition,
            path,
            annotated: 0,
            skipped: 0,
            failed: 0,
        }
    }

    /// Model invocations made for this partition.
    pub fn attempted(&self) -> usize {
        self.annotated + self.failed
    }
}

/// Outcome of a full sweep, one entry per partition in sweep order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    /// Per-partition outcomes
    pub partitions: Vec<PartitionReport>,
}

impl SweepReport {
    /// Total keys annotated.
    pub fn annotated(&self) -> usize {
        self.partitions.iter().map(|p| p.annotated).sum()
    }

    /// Total keys skipped.
    pub fn skipped(&self) -> usize {
        self.partitions.iter().map(|p| p.skipped).sum()
    }

    /// Total failed keys.
    pub fn failed(&self) -> usize {
        self.partitions.iter().map(|p| p.failed).sum()
    }

    /// Total model invocations.
    pub fn attempted(&self) -> usize {
        self.partitions.iter().map(PartitionReport::attempted).sum()
    }
}
