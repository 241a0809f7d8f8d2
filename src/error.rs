use thiserror::Error;

/// Errors surfaced to the caller of a generation request.
#[derive(Debug, Error)]
pub enum PomError {
    /// No document could be read (missing file, probe failure, unreachable URL,
    /// or no cached analysis). Fatal to the request.
    #[error("Snapshot unavailable: {0}")]
    SnapshotUnavailable(String),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Failures of the AI text-generation path. None of these reach the end user
/// when the local fallback succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// Network failure or non-success HTTP status.
    #[error("AI transport error: {0}")]
    Transport(String),

    /// The provider answered, but not with the expected JSON envelope.
    #[error("AI response malformed: {0}")]
    Malformed(String),

    /// A one-shot adapter was asked to dispatch a second request.
    #[error("AI request already dispatched")]
    AlreadyDispatched,
}
