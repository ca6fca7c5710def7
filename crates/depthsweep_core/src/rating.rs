//! Psychological-depth rating fields and their values.

use crate::{FieldSource, extract};
use depthsweep_error::{GenerationError, GenerationErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Pattern every rating slot is constrained to.
pub const RATING_PATTERN: &str = "[1-5]";

/// The six rating fields, in generation order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
pub enum RatingField {
    /// Truthfulness to real human experience
    #[strum(serialize = "authenticity_score")]
    Authenticity,
    /// Depth of emotional depiction
    #[strum(serialize = "emotion_provoking_score")]
    EmotionProvoking,
    /// Capacity to evoke empathy and introspection
    #[strum(serialize = "empathy_score")]
    Empathy,
    /// Emotional and psychological pull on the reader
    #[strum(serialize = "engagement_score")]
    Engagement,
    /// Intricacy of characters, relationships and conflicts
    #[strum(serialize = "narrative_complexity_score")]
    NarrativeComplexity,
    /// Estimated likelihood of human authorship
    #[strum(serialize = "human_likeness_score")]
    HumanLikeness,
}

impl RatingField {
    /// Column and slot name, e.g. `empathy_score`.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Label printed before the slot in the assistant turn.
    pub fn label(self) -> &'static str {
        match self {
            RatingField::Authenticity => "Authenticity Score",
            RatingField::EmotionProvoking => "Emotion Provoking Score",
            RatingField::Empathy => "Empathy Score",
            RatingField::Engagement => "Engagement Score",
            RatingField::NarrativeComplexity => "Narrative Complexity Score",
            RatingField::HumanLikeness => "Human Likeness Score",
        }
    }

    /// Every field key in generation order.
    pub fn keys() -> Vec<&'static str> {
        RatingField::iter().map(RatingField::key).collect()
    }
}

/// A single rating, always one of 1 through 5.
///
/// # Examples
///
/// ```
/// use depthsweep_core::Rating;
///
/// let rating: Rating = "4".parse().unwrap();
/// assert_eq!(rating.value(), 4);
/// assert!("6".parse::<Rating>().is_err());
/// assert!("44".parse::<Rating>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Numeric value of the rating.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(format!("Rating out of range: {}", value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ '1'..='5'), None) => Ok(Rating(c as u8 - b'0')),
            _ => Err(format!("Not a rating: {:?}", s)),
        }
    }
}

/// The six ratings produced for one story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ratings {
    /// Authenticity score
    pub authenticity: Rating,
    /// Emotion-provoking score
    pub emotion_provoking: Rating,
    /// Empathy score
    pub empathy: Rating,
    /// Engagement score
    pub engagement: Rating,
    /// Narrative-complexity score
    pub narrative_complexity: Rating,
    /// Human-likeness score
    pub human_likeness: Rating,
}

impl Ratings {
    /// Build ratings by asking `f` for each field.
    pub fn from_fn(mut f: impl FnMut(RatingField) -> Rating) -> Self {
        Self {
            authenticity: f(RatingField::Authenticity),
            emotion_provoking: f(RatingField::EmotionProvoking),
            empathy: f(RatingField::Empathy),
            engagement: f(RatingField::Engagement),
            narrative_complexity: f(RatingField::NarrativeComplexity),
            human_likeness: f(RatingField::HumanLikeness),
        }
    }

    /// Extract the six ratings from a model result.
    ///
    /// # Errors
    ///
    /// `MissingField` when a rating slot is absent, `ConstraintViolation`
    /// when a value is not a single digit from 1 to 5.
    pub fn from_source<S>(output: &S) -> Result<Self, GenerationError>
    where
        S: FieldSource + ?Sized,
    {
        let fields = extract(output, &RatingField::keys())?;

        let rating_for = |field: RatingField| -> Result<Rating, GenerationError> {
            let value = fields.field(field.key()).unwrap_or_default();
            value.parse::<Rating>().map_err(|_| {
                GenerationError::new(GenerationErrorKind::ConstraintViolation {
                    slot: field.key().to_string(),
                    pattern: RATING_PATTERN.to_string(),
                    value: value.to_string(),
                })
            })
        };

        Ok(Self {
            authenticity: rating_for(RatingField::Authenticity)?,
            emotion_provoking: rating_for(RatingField::EmotionProvoking)?,
            empathy: rating_for(RatingField::Empathy)?,
            engagement: rating_for(RatingField::Engagement)?,
            narrative_complexity: rating_for(RatingField::NarrativeComplexity)?,
            human_likeness: rating_for(RatingField::HumanLikeness)?,
        })
    }

    /// Rating for a field.
    pub fn get(&self, field: RatingField) -> Rating {
        match field {
            RatingField::Authenticity => self.authenticity,
            RatingField::EmotionProvoking => self.emotion_provoking,
            RatingField::Empathy => self.empathy,
            RatingField::Engagement => self.engagement,
            RatingField::NarrativeComplexity => self.narrative_complexity,
            RatingField::HumanLikeness => self.human_likeness,
        }
    }

    /// `(field, rating)` pairs in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (RatingField, Rating)> + '_ {
        RatingField::iter().map(move |field| (field, self.get(field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldMap;

    fn full_output(value: &str) -> FieldMap {
        RatingField::iter().map(|f| (f.key(), value)).collect()
    }

    #[test]
    fn test_field_keys_in_generation_order() {
        assert_eq!(
            RatingField::keys(),
            vec![
                "authenticity_score",
                "emotion_provoking_score",
                "empathy_score",
                "engagement_score",
                "narrative_complexity_score",
                "human_likeness_score",
            ]
        );
    }

    #[test]
    fn test_field_parses_from_key() {
        assert_eq!(
            "narrative_complexity_score".parse::<RatingField>().unwrap(),
            RatingField::NarrativeComplexity
        );
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::try_from(0).is_err());
        assert!(Rating::try_from(6).is_err());
        for value in 1..=5u8 {
            assert_eq!(Rating::try_from(value).unwrap().value(), value);
        }
    }

    #[test]
    fn test_rating_rejects_padding() {
        assert!(" 3".parse::<Rating>().is_err());
        assert!("".parse::<Rating>().is_err());
    }

    #[test]
    fn test_from_source_reads_each_field() {
        let mut output = full_output("3");
        output.insert("empathy_score", "5");
        let ratings = Ratings::from_source(&output).unwrap();
        assert_eq!(ratings.empathy.value(), 5);
        assert_eq!(ratings.authenticity.value(), 3);
        assert_eq!(ratings.get(RatingField::HumanLikeness).value(), 3);
    }

    #[test]
    fn test_from_source_missing_field() {
        let output: FieldMap = [("authenticity_score", "2")].into_iter().collect();
        let err = Ratings::from_source(&output).unwrap_err();
        assert_eq!(
            err.kind,
            GenerationErrorKind::MissingField("emotion_provoking_score".into())
        );
    }

    #[test]
    fn test_from_source_out_of_domain() {
        let mut output = full_output("3");
        output.insert("engagement_score", "7");
        let err = Ratings::from_source(&output).unwrap_err();
        assert!(matches!(
            err.kind,
            GenerationErrorKind::ConstraintViolation { ref slot, .. } if slot == "engagement_score"
        ));
    }

    #[test]
    fn test_rating_serializes_as_number() {
        let json = serde_json::to_string(&Rating::try_from(4).unwrap()).unwrap();
        assert_eq!(json, "4");
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
