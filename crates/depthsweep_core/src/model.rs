//! Model identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of a generative model: a local `.gguf` path or a hub repository id.
///
/// # Examples
///
/// ```
/// use depthsweep_core::ModelId;
///
/// let local = ModelId::new("/models/Meta-Llama-3-8B-Instruct-f16.gguf");
/// assert!(local.is_local_file());
/// assert_eq!(local.short_name(), "Meta-Llama-3-8B-Instruct-f16");
///
/// let hub = ModelId::new("meta-llama/Meta-Llama-3-8B-Instruct");
/// assert!(!hub.is_local_file());
/// assert_eq!(hub.short_name(), "meta-llama--Meta-Llama-3-8B-Instruct");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier names a GGUF file on disk.
    pub fn is_local_file(&self) -> bool {
        self.0.to_lowercase().ends_with(".gguf")
    }

    /// Path-safe name used for output files.
    ///
    /// GGUF paths reduce to their file stem; hub ids have `/` replaced by `--`.
    pub fn short_name(&self) -> String {
        if self.is_local_file() {
            let file = self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0);
            file[..file.len() - ".gguf".len()].to_string()
        } else {
            self.0.replace('/', "--")
        }
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_strips_directories() {
        let id = ModelId::new("/data/llama.cpp_models/Meta-Llama-3-70B-Instruct-f16.gguf");
        assert_eq!(id.short_name(), "Meta-Llama-3-70B-Instruct-f16");
    }

    #[test]
    fn test_short_name_of_bare_file() {
        assert_eq!(ModelId::new("tiny.GGUF").short_name(), "tiny");
    }

    #[test]
    fn test_short_name_of_hub_id() {
        assert_eq!(
            ModelId::new("org/family/variant").short_name(),
            "org--family--variant"
        );
    }
}
