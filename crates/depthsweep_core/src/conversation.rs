//! Conversations made of role-tagged turns and constrained generation slots.

use crate::Role;
use depthsweep_error::{BuilderError, BuilderErrorKind};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single constrained generation point.
///
/// The model must produce text matching `pattern` in full, sampled at
/// `temperature`. The value is later looked up by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Slot {
    /// Name the generated value is stored under
    name: String,
    /// Regular expression the generated value must match
    pattern: String,
    /// Sampling temperature for this slot
    temperature: f32,
}

impl Slot {
    /// Create a new slot.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, temperature: f32) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            temperature,
        }
    }
}

/// Content of a turn: literal text or a slot to be generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Segment {
    /// Literal text
    Text(String),
    /// Constrained generation point
    Slot(Slot),
}

impl Segment {
    /// Literal text segment.
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text(text.into())
    }

    /// Slot segment.
    pub fn slot(name: impl Into<String>, pattern: impl Into<String>, temperature: f32) -> Self {
        Segment::Slot(Slot::new(name, pattern, temperature))
    }
}

/// One role-tagged turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Who speaks this turn
    pub role: Role,
    /// Ordered content of the turn
    pub segments: Vec<Segment>,
}

impl Turn {
    /// Concatenated literal text of the turn, ignoring slots.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text.as_str()),
                Segment::Slot(_) => None,
            })
            .collect()
    }

    /// Slots of the turn in order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(slot) => Some(slot),
            Segment::Text(_) => None,
        })
    }
}

/// A finalized conversation ready to submit to a model.
///
/// Built only through [`ConversationBuilder`], which guarantees at least one
/// turn, slots only inside assistant turns, unique slot names, and valid
/// slot patterns.
///
/// # Examples
///
/// ```
/// use depthsweep_core::{Conversation, Role, Segment};
///
/// let conversation = Conversation::builder()
///     .system("You are a careful reader.")
///     .user("Rate this story.")
///     .assistant(vec![
///         Segment::text("Score: "),
///         Segment::slot("score", "[1-5]", 0.0),
///     ])
///     .build()
///     .unwrap();
///
/// assert_eq!(conversation.turns().len(), 3);
/// assert_eq!(conversation.turns()[0].role, Role::System);
/// assert_eq!(conversation.slots().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Start building a conversation.
    pub fn builder() -> ConversationBuilder {
        ConversationBuilder::default()
    }

    /// Every slot of the conversation in generation order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.turns.iter().flat_map(Turn::slots)
    }
}

/// Accumulates ordered turns and validates them into a [`Conversation`].
#[derive(Debug, Clone, Default)]
pub struct ConversationBuilder {
    turns: Vec<Turn>,
}

impl ConversationBuilder {
    /// Append a system turn.
    pub fn system(self, text: impl Into<String>) -> Self {
        self.turn(Role::System, vec![Segment::text(text)])
    }

    /// Append a user turn.
    pub fn user(self, text: impl Into<String>) -> Self {
        self.turn(Role::User, vec![Segment::text(text)])
    }

    /// Append an assistant turn made of text and slots.
    pub fn assistant(self, segments: Vec<Segment>) -> Self {
        self.turn(Role::Assistant, segments)
    }

    /// Append an arbitrary turn.
    pub fn turn(mut self, role: Role, segments: Vec<Segment>) -> Self {
        self.turns.push(Turn { role, segments });
        self
    }

    /// Validate and finalize the conversation.
    pub fn build(self) -> Result<Conversation, BuilderError> {
        self.validate()?;
        Ok(Conversation { turns: self.turns })
    }

    fn validate(&self) -> Result<(), BuilderError> {
        if self.turns.is_empty() {
            return Err(BuilderError::new(BuilderErrorKind::Empty));
        }

        let mut seen = HashSet::new();
        for turn in &self.turns {
            for slot in turn.slots() {
                if turn.role != Role::Assistant {
                    return Err(BuilderError::new(BuilderErrorKind::MisplacedSlot(
                        slot.name.clone(),
                    )));
                }
                if !seen.insert(slot.name.as_str()) {
                    return Err(BuilderError::new(BuilderErrorKind::DuplicateSlot(
                        slot.name.clone(),
                    )));
                }
                regex::Regex::new(&slot.pattern).map_err(|e| {
                    BuilderError::new(BuilderErrorKind::InvalidPattern {
                        slot: slot.name.clone(),
                        reason: e.to_string(),
                    })
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_conversation_rejected() {
        let err = Conversation::builder().build().unwrap_err();
        assert_eq!(err.kind(), &BuilderErrorKind::Empty);
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let err = Conversation::builder()
            .user("hi")
            .assistant(vec![
                Segment::slot("a", "[1-5]", 0.0),
                Segment::slot("a", "[1-5]", 0.0),
            ])
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), &BuilderErrorKind::DuplicateSlot("a".into()));
    }

    #[test]
    fn test_slot_outside_assistant_rejected() {
        let err = Conversation::builder()
            .turn(Role::User, vec![Segment::slot("a", "[1-5]", 0.0)])
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), &BuilderErrorKind::MisplacedSlot("a".into()));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = Conversation::builder()
            .assistant(vec![Segment::slot("a", "[1-", 0.0)])
            .build()
            .unwrap_err();
        assert!(matches!(err.kind(), BuilderErrorKind::InvalidPattern { .. }));
    }

    #[test]
    fn test_turn_text_skips_slots() {
        let turn = Turn {
            role: Role::Assistant,
            segments: vec![
                Segment::text("Score: "),
                Segment::slot("score", "[1-5]", 1.0),
                Segment::text("\n"),
            ],
        };
        assert_eq!(turn.text(), "Score: \n");
        assert_eq!(turn.slots().count(), 1);
    }
}
