//! Options passed to a model loader.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How model layers are spread over available devices.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DevicePlacement {
    /// Split layers across every visible device
    #[default]
    Auto,
    /// Keep the whole model on one device
    Single,
}

/// Options recognised when loading a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Echo prompts and backend logs to the console
    pub echo: bool,
    /// Layers to offload to the GPU; negative means all
    pub gpu_layers: i32,
    /// Context length limit in tokens
    pub context_length: u32,
    /// Where downloaded models are cached
    pub cache_dir: Option<PathBuf>,
    /// Device placement policy
    pub device_placement: DevicePlacement,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            echo: false,
            gpu_layers: -1,
            context_length: 3072,
            cache_dir: None,
            device_placement: DevicePlacement::Auto,
        }
    }
}
