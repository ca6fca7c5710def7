//! Flat CSV row form of an annotation record.

use depthsweep_core::{AnnotationRecord, Rating, Ratings, StoryRecord, deserialize_count};
use serde::{Deserialize, Serialize};

/// Column order of every annotation store.
pub(crate) const COLUMNS: [&str; 17] = [
    "authenticity_score",
    "emotion_provoking_score",
    "empathy_score",
    "engagement_score",
    "narrative_complexity_score",
    "human_likeness_score",
    "participant_id",
    "persona",
    "time_taken",
    "story_id",
    "premise_id",
    "premise",
    "text",
    "author_type",
    "author_short",
    "author_full",
    "net_upvotes",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AnnotationRow {
    authenticity_score: Rating,
    emotion_provoking_score: Rating,
    empathy_score: Rating,
    engagement_score: Rating,
    narrative_complexity_score: Rating,
    human_likeness_score: Rating,
    participant_id: usize,
    #[serde(default)]
    persona: String,
    time_taken: f64,
    story_id: i64,
    premise_id: i64,
    #[serde(default)]
    premise: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    author_type: String,
    #[serde(default)]
    author_short: String,
    #[serde(default)]
    author_full: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    net_upvotes: Option<i64>,
}

impl From<&AnnotationRecord> for AnnotationRow {
    fn from(record: &AnnotationRecord) -> Self {
        let ratings = &record.ratings;
        let story = &record.story;
        Self {
            authenticity_score: ratings.authenticity,
            emotion_provoking_score: ratings.emotion_provoking,
            empathy_score: ratings.empathy,
            engagement_score: ratings.engagement,
            narrative_complexity_score: ratings.narrative_complexity,
            human_likeness_score: ratings.human_likeness,
            participant_id: record.participant_id,
            persona: record.persona.clone(),
            time_taken: record.time_taken,
            story_id: story.story_id,
            premise_id: story.premise_id,
            premise: story.premise.clone(),
            text: story.text.clone(),
            author_type: story.author_type.clone(),
            author_short: story.author_short.clone(),
            author_full: story.author_full.clone(),
            net_upvotes: story.net_upvotes,
        }
    }
}

impl From<AnnotationRow> for AnnotationRecord {
    fn from(row: AnnotationRow) -> Self {
        Self {
            ratings: Ratings {
                authenticity: row.authenticity_score,
                emotion_provoking: row.emotion_provoking_score,
                empathy: row.empathy_score,
                engagement: row.engagement_score,
                narrative_complexity: row.narrative_complexity_score,
                human_likeness: row.human_likeness_score,
            },
            participant_id: row.participant_id,
            persona: row.persona,
            time_taken: row.time_taken,
            story: StoryRecord {
                story_id: row.story_id,
                premise_id: row.premise_id,
                premise: row.premise,
                text: row.text,
                author_type: row.author_type,
                author_short: row.author_short,
                author_full: row.author_full,
                net_upvotes: row.net_upvotes,
            },
        }
    }
}
