//! Error types and handling for the blog graph engine
//!
//! Domain errors raised by the integrity checks sit next to the
//! infrastructure errors (configuration, I/O, metrics) so every layer can
//! propagate a single `Error` with `?`.

use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the blog graph engine
#[derive(Error, Debug)]
pub enum Error {
    /// Another user already registered this email
    #[error("Email taken")]
    EmailTaken,

    /// A referenced user does not exist
    #[error("User not found")]
    UserNotFound,

    /// A referenced post does not exist
    #[error("Post not found")]
    PostNotFound,

    /// A referenced post exists but is still a draft
    #[error("Post not published")]
    PostNotPublished,

    /// Delete-by-id miss
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity type name (`User`, `Post`, `Comment`)
        entity: &'static str,
        /// Requested identifier
        id: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prometheus metrics errors
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl Error {
    /// Create a not found error for a delete-by-id miss
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable identifier of the error kind, used at the transport boundary
    pub fn kind(&self) -> &'static str {
        match self {
            Error::EmailTaken => "EmailTaken",
            Error::UserNotFound => "UserNotFound",
            Error::PostNotFound => "PostNotFound",
            Error::PostNotPublished => "PostNotPublished",
            Error::NotFound { .. } => "NotFound",
            Error::Config(_) => "Config",
            Error::Internal(_) => "Internal",
            Error::Io(_) => "Io",
            Error::Metrics(_) => "Metrics",
        }
    }
}
