//! Error types for the local inference server.

/// Error kinds for server operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// The server process could not be started
    #[display("Failed to launch server: {}", _0)]
    Launch(String),

    /// The server did not become healthy in time
    #[display("Server not ready after {} seconds", _0)]
    StartupTimeout(u64),

    /// The server process exited on its own
    #[display("Server process exited: {}", _0)]
    Exited(String),

    /// HTTP request failed
    #[display("HTTP request failed: {}", _0)]
    Http(String),

    /// Server answered with a non-success status
    #[display("API error: {}", _0)]
    Api(String),

    /// Failed to deserialize response
    #[display("Failed to deserialize response: {}", _0)]
    Deserialization(String),

    /// Configuration error
    #[display("Configuration error: {}", _0)]
    Configuration(String),
}

/// Error wrapper with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The error kind
    pub kind: ServerErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
