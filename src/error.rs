use thiserror::Error;

/// Crate-wide error type covering engine, workspace, and configuration failures.
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("State transition error: invalid transition from {from} on {event}")]
    StateTransition { from: String, event: String },

    #[error("Lesson error: {0}")]
    Lesson(String),

    #[error("Recorder error: {0}")]
    Recorder(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("No focused context available for action dispatch")]
    NoFocusedContext,

    #[error("Search text not found in document: {pattern:?}")]
    SearchNotFound { pattern: String },

    #[error("Document error: {0}")]
    Document(String),
}

pub type Result<T> = std::result::Result<T, TrainerError>;
