use serde::{Deserialize, Serialize};

/// Response of `POST /apply-template`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateResponse {
    /// The rendered prompt, ending with the assistant generation prefix
    pub prompt: String,
}

/// Response of `POST /completion`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Generated text
    pub content: String,
    /// Number of tokens generated
    #[serde(default)]
    pub tokens_predicted: u32,
    /// Whether generation stopped on its own
    #[serde(default)]
    pub stop: bool,
}

/// Response of `GET /props`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropsResponse {
    /// Path of the model file being served
    #[serde(default)]
    pub model_path: String,
}
