//! Depthsweep - resumable psychological-depth annotation sweeps.
//!
//! Depthsweep asks local language models to rate short stories on five
//! components of psychological depth plus the likelihood of human
//! authorship, from the point of view of several evaluator personas and at
//! several sampling temperatures. Results land in one CSV store per model
//! and temperature; rerunning the sweep only annotates what is missing.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use depthsweep::{LlamaServerLauncher, SweepConfig, SweepDriver, load_stories};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SweepConfig::load(None)?;
//!     let stories = load_stories(&config.dataset.path, config.dataset.encoding).await?;
//!
//!     let launcher = LlamaServerLauncher::new(config.server.clone());
//!     let report = SweepDriver::new(launcher, &config).run(&stories).await?;
//!     println!("annotated {} stories", report.annotated());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - export tracing spans through OpenTelemetry
//!
//! # Architecture
//!
//! - `depthsweep_error` - Error types
//! - `depthsweep_core` - Conversations, ratings, stories and annotation records
//! - `depthsweep_interface` - `ModelLoader` and `LanguageModel` traits
//! - `depthsweep_storage` - Dataset reader and resumable annotation stores
//! - `depthsweep_server` - llama.cpp server backend
//! - `depthsweep_annotate` - Prompt, configuration and sweep driver
//!
//! This crate (`depthsweep`) re-exports everything for convenience.

pub use depthsweep_annotate::*;
pub use depthsweep_core::*;
pub use depthsweep_error::*;
pub use depthsweep_interface::*;
pub use depthsweep_server::*;
pub use depthsweep_storage::*;

pub mod cli;
mod logging;

pub use logging::{LoggingConfig, init_logging};
