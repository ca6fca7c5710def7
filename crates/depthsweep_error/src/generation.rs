//! Errors raised while generating a single annotation.

/// Generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The model output lacks an expected field
    #[display("Missing field in model output: {}", _0)]
    MissingField(String),

    /// A generated value does not satisfy its slot constraint
    #[display("Value {:?} for '{}' violates pattern {}", value, slot, pattern)]
    ConstraintViolation {
        /// The slot name
        slot: String,
        /// The slot pattern
        pattern: String,
        /// What the model produced
        value: String,
    },

    /// The backend failed while running the conversation
    #[display("Backend failure: {}", _0)]
    Backend(String),
}

/// Generation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The error kind
    pub kind: GenerationErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
