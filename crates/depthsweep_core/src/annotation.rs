//! Annotation records and their identity keys.

use crate::{Persona, Ratings, StoryRecord};
use serde::{Deserialize, Serialize};

/// Identity of one annotation unit within a partition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display(
    "participant_id={}, story_id={}, premise_id={}",
    participant_id,
    story_id,
    premise_id
)]
pub struct AnnotationKey {
    /// Persona position
    pub participant_id: usize,
    /// Story identifier
    pub story_id: i64,
    /// Premise identifier
    pub premise_id: i64,
}

impl AnnotationKey {
    /// Create a key.
    pub fn new(participant_id: usize, story_id: i64, premise_id: i64) -> Self {
        Self {
            participant_id,
            story_id,
            premise_id,
        }
    }

    /// Key for annotating `story` as `participant_id`.
    pub fn for_story(participant_id: usize, story: &StoryRecord) -> Self {
        Self::new(participant_id, story.story_id, story.premise_id)
    }
}

/// One persisted annotation: ratings plus the persona and story they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// The six generated ratings
    pub ratings: Ratings,
    /// Persona position
    pub participant_id: usize,
    /// Persona text
    pub persona: String,
    /// Wall-clock seconds spent generating
    pub time_taken: f64,
    /// The annotated story
    pub story: StoryRecord,
}

impl AnnotationRecord {
    /// Merge generated ratings with the persona and story they describe.
    pub fn new(ratings: Ratings, persona: &Persona, time_taken: f64, story: StoryRecord) -> Self {
        Self {
            ratings,
            participant_id: *persona.participant_id(),
            persona: persona.text().clone(),
            time_taken,
            story,
        }
    }

    /// Identity key of this record.
    pub fn key(&self) -> AnnotationKey {
        AnnotationKey::for_story(self.participant_id, &self.story)
    }
}
