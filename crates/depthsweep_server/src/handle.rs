use crate::{CompletionRequest, LlamaClient, slot_grammar, slot_matches, split_conversation};
use async_trait::async_trait;
use depthsweep_core::{Conversation, FieldMap, ModelId, Segment, Slot};
use depthsweep_error::{DepthsweepResult, GenerationError, GenerationErrorKind, ServerError, ServerErrorKind};
use depthsweep_interface::LanguageModel;
use tokio::process::Child;
use tokio::sync::Mutex;
use tracing::instrument;

/// A model served by a running `llama-server` process.
///
/// The process is stopped by [`LanguageModel::unload`], or when the handle
/// is dropped.
#[derive(Debug)]
pub struct LlamaServerHandle {
    model: ModelId,
    client: LlamaClient,
    process: Mutex<Child>,
}

impl LlamaServerHandle {
    pub(crate) fn new(model: ModelId, client: LlamaClient, process: Child) -> Self {
        Self {
            model,
            client,
            process: Mutex::new(process),
        }
    }

    async fn generate_slot(&self, prompt: &str, slot: &Slot) -> Result<String, GenerationError> {
        let request = CompletionRequest::constrained(prompt, slot_grammar(slot.pattern()), *slot.temperature());
        let response = self.client.complete(&request).await.map_err(backend)?;
        let value = response.content;

        let matches = slot_matches(slot.pattern(), &value).map_err(|e| {
            GenerationError::new(GenerationErrorKind::Backend(format!(
                "Invalid pattern for '{}': {}",
                slot.name(),
                e
            )))
        })?;
        if !matches {
            return Err(GenerationError::new(GenerationErrorKind::ConstraintViolation {
                slot: slot.name().clone(),
                pattern: slot.pattern().clone(),
                value,
            }));
        }

        Ok(value)
    }
}

fn backend(error: ServerError) -> GenerationError {
    GenerationError::new(GenerationErrorKind::Backend(error.kind.to_string()))
}

#[async_trait]
impl LanguageModel for LlamaServerHandle {
    #[instrument(skip(self, conversation), fields(model = %self.model, slots = conversation.slots().count()))]
    async fn run(&self, conversation: &Conversation) -> Result<FieldMap, GenerationError> {
        let (messages, pending) = split_conversation(conversation);
        let mut fields = FieldMap::new();
        let Some(turn) = pending else {
            return Ok(fields);
        };

        let mut prompt = self.client.apply_template(messages).await.map_err(backend)?;
        for segment in &turn.segments {
            match segment {
                Segment::Text(text) => prompt.push_str(text),
                Segment::Slot(slot) => {
                    let value = self.generate_slot(&prompt, slot).await?;
                    prompt.push_str(&value);
                    fields.insert(slot.name().clone(), value);
                }
            }
        }

        tracing::debug!(fields = fields.len(), "Conversation complete");
        Ok(fields)
    }

    fn model_name(&self) -> &str {
        self.model.as_str()
    }

    #[instrument(skip(self), fields(model = %self.model))]
    async fn unload(self) -> DepthsweepResult<()> {
        let mut process = self.process.into_inner();
        process.kill().await.map_err(|e| {
            ServerError::new(ServerErrorKind::Exited(format!("Failed to stop server: {}", e)))
        })?;
        tracing::info!("Model unloaded");
        Ok(())
    }
}
