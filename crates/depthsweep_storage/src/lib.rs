//! Dataset reading and resumable annotation stores for depthsweep.
//!
//! Annotations are written to one CSV file per partition, a
//! (model, temperature) pair. Every write rewrites the whole file through a
//! temporary sibling and a rename, so an interrupted run leaves the previous
//! content intact and a later run can resume from it.
//!
//! # Example
//!
//! ```rust,no_run
//! use depthsweep_core::ModelId;
//! use depthsweep_storage::{AnnotationStore, CompletionLedger, Partition, PartitionLayout};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let layout = PartitionLayout::new("./processed", "annotations_mop");
//! let partition = Partition::new(ModelId::new("/models/llama-3-8b.gguf"), 0.0);
//! let store = AnnotationStore::new(layout.path_for(&partition));
//!
//! let ledger = CompletionLedger::load(&store).await?;
//! println!("{} annotations already stored", ledger.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dataset;
mod encoding;
mod ledger;
mod partition;
mod row;
mod store;

pub use dataset::load_stories;
pub use depthsweep_error::{StorageError, StorageErrorKind};
pub use encoding::TextEncoding;
pub use ledger::CompletionLedger;
pub use partition::{Partition, PartitionLayout, temperature_label};
pub use store::{AnnotationStore, dedupe};
