use crate::{
    ChatMessage, CompletionRequest, CompletionResponse, PropsResponse, ServerConfig,
    TemplateRequest, TemplateResponse,
};
use depthsweep_error::{ServerError, ServerErrorKind};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::instrument;

/// HTTP client for a running `llama-server`.
#[derive(Debug, Clone)]
pub struct LlamaClient {
    base_url: String,
    client: reqwest::Client,
}

impl LlamaClient {
    /// Create a client for the server described by `config`.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        tracing::debug!("Creating server client");
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs() {
            builder = builder.timeout(Duration::from_secs(*secs));
        }
        let client = builder.build().map_err(|e| {
            ServerError::new(ServerErrorKind::Configuration(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })?;

        Ok(Self {
            base_url: config.base_url(),
            client,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check whether the server has finished loading its model.
    ///
    /// The server answers 503 while loading and 200 once ready.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<(), ServerError> {
        let url = format!("{}/health", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            ServerError::new(ServerErrorKind::Http(format!("Health check failed: {}", e)))
        })?;

        if response.status().is_success() {
            tracing::debug!("Server is healthy");
            Ok(())
        } else {
            Err(ServerError::new(ServerErrorKind::Api(format!(
                "Server returned: {}",
                response.status()
            ))))
        }
    }

    /// Server properties, including the path of the served model.
    #[instrument(skip(self))]
    pub async fn props(&self) -> Result<PropsResponse, ServerError> {
        let url = format!("{}/props", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            ServerError::new(ServerErrorKind::Http(format!("Props request failed: {}", e)))
        })?;

        if !response.status().is_success() {
            return Err(ServerError::new(ServerErrorKind::Api(format!(
                "Server returned: {}",
                response.status()
            ))));
        }

        response.json().await.map_err(|e| {
            ServerError::new(ServerErrorKind::Deserialization(format!(
                "Failed to parse props: {}",
                e
            )))
        })
    }

    /// Render messages with the model's chat template.
    ///
    /// The rendered prompt ends with the assistant generation prefix.
    #[instrument(skip(self, messages), fields(messages = messages.len()))]
    pub async fn apply_template(&self, messages: Vec<ChatMessage>) -> Result<String, ServerError> {
        let response: TemplateResponse = self
            .post("apply-template", &TemplateRequest { messages })
            .await?;
        Ok(response.prompt)
    }

    /// Run a raw completion.
    #[instrument(skip(self, request), fields(n_predict = request.n_predict, temperature = request.temperature))]
    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, ServerError> {
        let response: CompletionResponse = self.post("completion", request).await?;
        tracing::debug!(content = %response.content, "Completion received");
        Ok(response)
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, ServerError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            ServerError::new(ServerErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            tracing::error!("Server returned error: {} {}", status, detail);
            return Err(ServerError::new(ServerErrorKind::Api(format!(
                "Server returned: {} {}",
                status, detail
            ))));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            ServerError::new(ServerErrorKind::Deserialization(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }
}
