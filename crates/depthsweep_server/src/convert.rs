//! Mapping conversations onto the server's template and completion calls.

use crate::ChatMessage;
use depthsweep_core::{Conversation, Role, Turn};
use regex::Regex;

/// Split a conversation into templated context and the assistant turn to fill.
///
/// When the last turn belongs to the assistant, every earlier turn becomes a
/// chat message and the last turn is returned for segment-by-segment
/// generation. Otherwise all turns are context and nothing is generated.
pub fn split_conversation(conversation: &Conversation) -> (Vec<ChatMessage>, Option<&Turn>) {
    let turns = conversation.turns();
    let (context, pending) = match turns.split_last() {
        Some((last, rest)) if last.role == Role::Assistant => (rest, Some(last)),
        _ => (turns.as_slice(), None),
    };

    let messages = context
        .iter()
        .map(|turn| ChatMessage::new(turn.role.to_string(), turn.text()))
        .collect();

    (messages, pending)
}

/// GBNF grammar whose root is the slot pattern.
///
/// Slot patterns are simple character classes and literals, which read the
/// same in both regex and GBNF.
pub fn slot_grammar(pattern: &str) -> String {
    format!("root ::= {}", pattern)
}

/// Whether `value` matches `pattern` in full.
pub fn slot_matches(pattern: &str, value: &str) -> Result<bool, regex::Error> {
    let anchored = Regex::new(&format!("^(?:{})$", pattern))?;
    Ok(anchored.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthsweep_core::Segment;

    #[test]
    fn test_split_trailing_assistant_turn() {
        let conversation = Conversation::builder()
            .system("persona")
            .user("rate this")
            .assistant(vec![Segment::text("Score: "), Segment::slot("s", "[1-5]", 0.0)])
            .build()
            .unwrap();

        let (messages, pending) = split_conversation(&conversation);
        assert_eq!(
            messages,
            vec![
                ChatMessage::new("system", "persona"),
                ChatMessage::new("user", "rate this"),
            ]
        );
        assert_eq!(pending.unwrap().slots().count(), 1);
    }

    #[test]
    fn test_split_without_assistant_turn() {
        let conversation = Conversation::builder().user("hello").build().unwrap();
        let (messages, pending) = split_conversation(&conversation);
        assert_eq!(messages.len(), 1);
        assert!(pending.is_none());
    }

    #[test]
    fn test_slot_grammar() {
        assert_eq!(slot_grammar("[1-5]"), "root ::= [1-5]");
    }

    #[test]
    fn test_slot_matches_is_anchored() {
        assert!(slot_matches("[1-5]", "3").unwrap());
        assert!(!slot_matches("[1-5]", "6").unwrap());
        assert!(!slot_matches("[1-5]", "34").unwrap());
        assert!(!slot_matches("[1-5]", " 3").unwrap());
        assert!(!slot_matches("[1-5]", "").unwrap());
    }
}
