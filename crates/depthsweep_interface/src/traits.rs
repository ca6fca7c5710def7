//! Traits at the model seam.

use crate::LoadOptions;
use async_trait::async_trait;
use depthsweep_core::{Conversation, FieldMap, ModelId};
use depthsweep_error::{DepthsweepResult, GenerationError};

/// Loads models by identifier.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// The loaded model type.
    type Model: LanguageModel;

    /// Load a model. Failure here is fatal for that model's sweep.
    async fn load(&self, id: &ModelId, options: &LoadOptions) -> DepthsweepResult<Self::Model>;
}

/// A loaded model able to fill the slots of a conversation.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate every slot of `conversation`, returning values by slot name.
    ///
    /// Any backend failure surfaces as a single [`GenerationError`]; callers
    /// decide whether to retry.
    async fn run(&self, conversation: &Conversation) -> Result<FieldMap, GenerationError>;

    /// Model identifier this handle was loaded from.
    fn model_name(&self) -> &str;

    /// Release the model's resources.
    async fn unload(self) -> DepthsweepResult<()>
    where
        Self: Sized;
}
