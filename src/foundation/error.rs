/// Crate-wide result alias.
pub type ReelResult<T> = Result<T, ReelError>;

/// Errors surfaced by scrollreel.
///
/// Runtime paths that the page must survive (measurement gaps, stale frame callbacks, scenes whose
/// surface cannot be created) never produce one of these; they degrade in place. Errors are reserved
/// for load-time problems: bad configuration, malformed content, failed IO.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid configuration or page structure.
    #[error("validation error: {0}")]
    Validation(String),

    /// Dataset or chapter content that violates its schema.
    #[error("content error: {0}")]
    Content(String),

    /// A drawing surface could not be created or drawn into.
    #[error("surface error: {0}")]
    Surface(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, typically IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Content`].
    pub fn content(msg: impl Into<String>) -> Self {
        Self::Content(msg.into())
    }

    /// Build a [`ReelError::Surface`].
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`ReelError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
