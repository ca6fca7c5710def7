use crate::build_conversation;
use depthsweep_core::{Persona, Ratings, StoryRecord};
use depthsweep_error::DepthsweepResult;
use depthsweep_interface::LanguageModel;
use tracing::instrument;

/// Ask `model` to rate one story from one persona's point of view.
///
/// Any failure is confined to this story: the caller logs it and moves on.
#[instrument(
    skip(model, persona, story),
    fields(
        model = model.model_name(),
        participant_id = persona.participant_id(),
        story_id = story.story_id,
        premise_id = story.premise_id,
    )
)]
pub async fn annotate<M>(
    model: &M,
    persona: &Persona,
    story: &StoryRecord,
    temperature: f32,
) -> DepthsweepResult<Ratings>
where
    M: LanguageModel + ?Sized,
{
    let conversation = build_conversation(persona, &story.text, temperature)?;
    let output = model.run(&conversation).await?;
    Ok(Ratings::from_source(&output)?)
}
