//! Psychological-depth annotation sweep.
//!
//! For every configured model, temperature, persona and story the
//! [`SweepDriver`] asks the model for six 1-5 ratings, skipping keys that
//! already have a stored annotation and persisting after every story so an
//! interrupted run resumes where it stopped.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotator;
mod config;
mod prompt;
mod report;
mod sweep;

pub use annotator::annotate;
pub use config::{DatasetConfig, OutputConfig, SweepConfig};
pub use prompt::{build_conversation, task_prompt};
pub use report::{PartitionReport, SweepReport};
pub use sweep::SweepDriver;
