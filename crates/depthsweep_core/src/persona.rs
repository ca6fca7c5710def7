//! Evaluator personas.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// An evaluator role, identified by its position in the persona list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Persona {
    participant_id: usize,
    text: String,
}

impl Persona {
    /// Create a persona.
    pub fn new(participant_id: usize, text: impl Into<String>) -> Self {
        Self {
            participant_id,
            text: text.into(),
        }
    }

    /// Assign participant ids by list position.
    ///
    /// # Examples
    ///
    /// ```
    /// use depthsweep_core::Persona;
    ///
    /// let personas = Persona::from_list(&["critic".to_string(), String::new()]);
    /// assert_eq!(*personas[1].participant_id(), 1);
    /// assert!(personas[1].is_blank());
    /// ```
    pub fn from_list(texts: &[String]) -> Vec<Persona> {
        texts
            .iter()
            .enumerate()
            .map(|(participant_id, text)| Persona::new(participant_id, text.clone()))
            .collect()
    }

    /// A blank persona contributes no system turn.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}
