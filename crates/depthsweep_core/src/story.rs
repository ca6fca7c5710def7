//! Stories read from the input dataset.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of the input dataset.
///
/// Column names match the dataset header:
/// `story_id,premise_id,premise,text,author_type,author_short,author_full,net_upvotes`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoryRecord {
    /// Story identifier
    pub story_id: i64,
    /// Identifier of the writing premise the story answers
    pub premise_id: i64,
    /// Premise text
    pub premise: String,
    /// Story body shown to the model
    pub text: String,
    /// Kind of author (human, model family, ...)
    pub author_type: String,
    /// Short author label
    pub author_short: String,
    /// Full author label
    pub author_full: String,
    /// Community score, absent for generated stories
    #[serde(default, deserialize_with = "deserialize_count")]
    pub net_upvotes: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Read an optional whole number written as `12`, `12.0`, or left empty.
///
/// Tabular tools write integer columns with missing cells as floats, so an
/// integral float is accepted. A fractional value is an error.
///
/// # Examples
///
/// ```
/// use depthsweep_core::StoryRecord;
///
/// let story: StoryRecord = serde_json::from_str(
///     r#"{"story_id": 1, "premise_id": 2, "premise": "", "text": "",
///         "author_type": "", "author_short": "", "author_full": "",
///         "net_upvotes": 12.0}"#,
/// )
/// .unwrap();
/// assert_eq!(story.net_upvotes, Some(12));
/// ```
pub fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let float = |value: f64| {
        if value.is_finite() && value.fract() == 0.0 {
            Ok(Some(value as i64))
        } else {
            Err(serde::de::Error::custom(format!("not a whole number: {}", value)))
        }
    };

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Integer(value)) => Ok(Some(value)),
        Some(Count::Float(value)) => float(value),
        Some(Count::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else if let Ok(value) = text.parse::<i64>() {
                Ok(Some(value))
            } else {
                let value = text.parse::<f64>().map_err(|_| {
                    serde::de::Error::custom(format!("not a number: {:?}", text))
                })?;
                float(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upvotes(json: &str) -> Result<Option<i64>, serde_json::Error> {
        let row = format!(
            r#"{{"story_id": 1, "premise_id": 2, "premise": "p", "text": "t",
                "author_type": "human", "author_short": "h", "author_full": "Human"{}}}"#,
            json
        );
        serde_json::from_str::<StoryRecord>(&row).map(|story| story.net_upvotes)
    }

    #[test]
    fn test_upvotes_accept_integral_forms() {
        assert_eq!(upvotes(r#", "net_upvotes": 12"#).unwrap(), Some(12));
        assert_eq!(upvotes(r#", "net_upvotes": 12.0"#).unwrap(), Some(12));
        assert_eq!(upvotes(r#", "net_upvotes": "-3.0""#).unwrap(), Some(-3));
        assert_eq!(upvotes(r#", "net_upvotes": null"#).unwrap(), None);
        assert_eq!(upvotes(r#", "net_upvotes": """#).unwrap(), None);
        assert_eq!(upvotes("").unwrap(), None);
    }

    #[test]
    fn test_upvotes_reject_fractions() {
        assert!(upvotes(r#", "net_upvotes": 12.5"#).is_err());
        assert!(upvotes(r#", "net_upvotes": "many""#).is_err());
    }
}
