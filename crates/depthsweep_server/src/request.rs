use serde::{Deserialize, Serialize};

/// A chat message sent for template rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a new message
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Body of `POST /apply-template`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateRequest {
    /// Messages to render with the model's chat template
    pub messages: Vec<ChatMessage>,
}

/// Body of `POST /completion`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    /// Raw prompt, already templated
    pub prompt: String,
    /// Maximum tokens to predict
    pub n_predict: i32,
    /// Sampling temperature
    pub temperature: f32,
    /// GBNF grammar constraining the output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar: Option<String>,
    /// Reuse the KV cache for the shared prompt prefix
    pub cache_prompt: bool,
    /// Always false; responses are read whole
    pub stream: bool,
}

impl CompletionRequest {
    /// A single-token completion constrained by `grammar`.
    pub fn constrained(prompt: impl Into<String>, grammar: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            n_predict: 1,
            temperature,
            grammar: Some(grammar.into()),
            cache_prompt: true,
            stream: false,
        }
    }
}
