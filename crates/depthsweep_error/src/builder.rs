//! Conversation builder errors.

/// Specific builder error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// The conversation has no turns
    #[display("Conversation has no turns")]
    Empty,

    /// Two slots share the same name
    #[display("Duplicate slot name: {}", _0)]
    DuplicateSlot(String),

    /// A slot pattern is not a valid regular expression
    #[display("Invalid pattern for slot '{}': {}", slot, reason)]
    InvalidPattern {
        /// The slot name
        slot: String,
        /// Why the pattern was rejected
        reason: String,
    },

    /// A slot was placed outside an assistant turn
    #[display("Slot '{}' must belong to an assistant turn", _0)]
    MisplacedSlot(String),
}

/// Builder error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}
