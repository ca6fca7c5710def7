//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GenerationError, ServerError, StorageError};

/// Every error condition the workspace can surface.
///
/// # Examples
///
/// ```
/// use depthsweep_error::{DepthsweepError, ConfigError};
///
/// let err: DepthsweepError = ConfigError::new("bad value").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum DepthsweepErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Conversation builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Dataset or annotation store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Local inference server error
    #[from(ServerError)]
    Server(ServerError),
    /// Annotation generation error
    #[from(GenerationError)]
    Generation(GenerationError),
}

/// Depthsweep error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Depthsweep Error: {}", _0)]
pub struct DepthsweepError(Box<DepthsweepErrorKind>);

impl DepthsweepError {
    /// Create a new error from a kind.
    pub fn new(kind: DepthsweepErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DepthsweepErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to DepthsweepErrorKind
impl<T> From<T> for DepthsweepError
where
    T: Into<DepthsweepErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for depthsweep operations.
pub type DepthsweepResult<T> = std::result::Result<T, DepthsweepError>;
