//! The annotation prompt.

use depthsweep_core::{Conversation, Persona, RATING_PATTERN, RatingField, Segment};
use depthsweep_error::BuilderError;
use strum::IntoEnumIterator;

const TASK_DESCRIPTION: &str = "\
###Task Description:
1. Review the given components of psychological depth: authenticity, emotion provoking, empathy, engagement, and narrative complexity. Be sure to understand each concept and the questions that characterize them.
2. Read a given story, paying special attention to components of psychological depth.
3. Assign a rating for each component from 1 to 5. 1 is greatly below average, 3 is average and 5 is greatly above average (should be rare to provide this score).
4. Lastly, estimate the likelihood that each story was authored by a human or an LLM. Think about what human or LLM writing characteristics may be. Assign a score from 1 to 5, where 1 means very likely LLM written and 5 means very likely human written.

###Description of Psychological Depth Components:

We define psychological depth in terms of the following concepts, each illustrated by several questions:

- Authenticity
    - Does the writing feel true to real human experiences?
    - Does it represent psychological processes in a way that feels authentic and believable?
- Emotion Provoking
    - How well does the writing depict emotional experiences?
    - Does it explore the nuances of the characters' emotional states, rather than just describing them in simple terms?
    - Can the writing show rather than tell a wide variety of emotions?
    - Do the emotions that are shown in the text make sense in the context of the story?
- Empathy
    - Do you feel like you were able to empathize with the characters and situations in the text?
    - Do you feel that the text led you to introspection, or to new insights about yourself or the world?
- Engagement
    - Does the text engage you on an emotional and psychological level?
    - Do you feel the need to keep reading as you read the text?
- Narrative Complexity
    - Do the characters in the story have multifaceted personalities? Are they developed beyond stereotypes or tropes? Do they exhibit internal conflicts?
    - Does the writing explore the complexities of relationships between characters?
    - Does it delve into the intricacies of conflicts and their partial or complete resolutions?

###The story to evaluate:
";

/// The user turn: task instructions followed by the story.
pub fn task_prompt(story: &str) -> String {
    format!("{}{}\n", TASK_DESCRIPTION, story)
}

/// Build the annotation conversation for one persona and story.
///
/// A blank persona adds no system turn. The assistant turn holds one
/// labelled `[1-5]` slot per rating field, one per line, all sampled at
/// `temperature`.
///
/// # Examples
///
/// ```
/// use depthsweep_annotate::build_conversation;
/// use depthsweep_core::{Persona, Role};
///
/// let conversation = build_conversation(&Persona::new(0, ""), "Once upon a time.", 0.0).unwrap();
/// assert_eq!(conversation.turns()[0].role, Role::User);
/// assert_eq!(conversation.slots().count(), 6);
/// ```
pub fn build_conversation(
    persona: &Persona,
    story: &str,
    temperature: f32,
) -> Result<Conversation, BuilderError> {
    let mut builder = Conversation::builder();
    if !persona.is_blank() {
        builder = builder.system(persona.text().as_str());
    }

    let mut segments = Vec::new();
    for (index, field) in RatingField::iter().enumerate() {
        let separator = if index == 0 { "" } else { "\n" };
        segments.push(Segment::text(format!("{}{}: ", separator, field.label())));
        segments.push(Segment::slot(field.key(), RATING_PATTERN, temperature));
    }
    segments.push(Segment::text("\n"));

    builder.user(task_prompt(story)).assistant(segments).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthsweep_core::Role;

    #[test]
    fn test_persona_becomes_system_turn() {
        let persona = Persona::new(2, "You evaluate engagement.");
        let conversation = build_conversation(&persona, "A story.", 1.0).unwrap();

        let roles: Vec<Role> = conversation.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(conversation.turns()[0].text(), "You evaluate engagement.");
    }

    #[test]
    fn test_story_ends_user_turn() {
        let conversation = build_conversation(&Persona::new(0, ""), "The lighthouse went dark.", 0.0).unwrap();
        let user = conversation.turns()[0].text();
        assert!(user.starts_with("###Task Description:"));
        assert!(user.ends_with("###The story to evaluate:\nThe lighthouse went dark.\n"));
    }

    #[test]
    fn test_slots_follow_rating_fields() {
        let conversation = build_conversation(&Persona::new(0, "p"), "s", 0.5).unwrap();
        let names: Vec<&str> = conversation.slots().map(|s| s.name().as_str()).collect();
        assert_eq!(names, RatingField::keys());
        assert!(conversation
            .slots()
            .all(|s| s.pattern() == RATING_PATTERN && *s.temperature() == 0.5));
    }

    #[test]
    fn test_assistant_labels() {
        let conversation = build_conversation(&Persona::new(0, ""), "s", 0.0).unwrap();
        let assistant = conversation.turns().last().unwrap().text();
        assert_eq!(
            assistant,
            "Authenticity Score: \nEmotion Provoking Score: \nEmpathy Score: \n\
             Engagement Score: \nNarrative Complexity Score: \nHuman Likeness Score: \n"
        );
    }
}
