//! Error types for depthsweep.
//!
//! This crate provides the foundation error types used throughout the depthsweep workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use depthsweep_error::{ConfigError, DepthsweepResult};
//!
//! fn load() -> DepthsweepResult<()> {
//!     Err(ConfigError::new("no models configured"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod generation;
mod server;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{DepthsweepError, DepthsweepErrorKind, DepthsweepResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
