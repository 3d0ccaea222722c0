//! Error types for routing operations

use thiserror::Error;

/// Routing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The requested topic is not one of the predefined routing keys
    #[error("Topic '{0}' not recognized")]
    TopicNotRecognized(String),

    /// The requested document is not part of the reference catalogue
    #[error("Document '{0}' not recognized")]
    DocumentNotRecognized(String),

    /// The requested checklist does not exist
    #[error("Checklist '{0}' not recognized")]
    ChecklistNotRecognized(String),

    /// The routing table violates one of its structural invariants
    #[error("Routing table integrity violated: {0}")]
    Integrity(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, RouteError>;
