//! Trait definitions for depthsweep model backends.
//!
//! A backend provides a [`ModelLoader`] that turns a model identifier into a
//! loaded [`LanguageModel`]. The sweep driver owns the loaded model for the
//! duration of one model's sweep and unloads it before loading the next.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{LanguageModel, ModelLoader};
pub use types::{DevicePlacement, LoadOptions};
