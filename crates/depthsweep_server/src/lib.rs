//! llama.cpp server backend for depthsweep.
//!
//! Loading a model launches a `llama-server` process dedicated to it and
//! waits until the server reports healthy. The returned
//! [`LlamaServerHandle`] owns that process: [`LlamaServerHandle::unload`]
//! stops it explicitly, and dropping the handle stops it as well.
//!
//! Conversations are run the way a constrained-generation template engine
//! would: the system and user turns are rendered through the model's chat
//! template, then the final assistant turn is walked segment by segment,
//! appending literal text and generating each slot with a one-token
//! completion restricted by a GBNF grammar.
//!
//! # Example
//!
//! ```rust,no_run
//! use depthsweep_core::{Conversation, ModelId, Segment};
//! use depthsweep_interface::{LanguageModel, LoadOptions, ModelLoader};
//! use depthsweep_server::{LlamaServerLauncher, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let launcher = LlamaServerLauncher::new(ServerConfig::default());
//!     let model = launcher
//!         .load(&ModelId::new("/models/llama-3-8b.gguf"), &LoadOptions::default())
//!         .await?;
//!
//!     let conversation = Conversation::builder()
//!         .user("Pick a number from 1 to 5.")
//!         .assistant(vec![Segment::text("Number: "), Segment::slot("n", "[1-5]", 0.0)])
//!         .build()?;
//!     let fields = model.run(&conversation).await?;
//!     println!("{:?}", fields);
//!
//!     model.unload().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod convert;
mod handle;
mod launcher;
mod request;
mod response;

pub use client::LlamaClient;
pub use config::{ServerConfig, ServerConfigBuilder};
pub use convert::{slot_grammar, slot_matches, split_conversation};
pub use depthsweep_error::{ServerError, ServerErrorKind};
pub use handle::LlamaServerHandle;
pub use launcher::{LlamaServerLauncher, server_args, serves_model};
pub use request::{ChatMessage, CompletionRequest, TemplateRequest};
pub use response::{CompletionResponse, PropsResponse, TemplateResponse};
