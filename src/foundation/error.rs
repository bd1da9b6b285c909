/// Convenience result type used across the sequencer.
pub type FilResult<T> = Result<T, FilError>;

/// Top-level error taxonomy used by the library APIs.
///
/// Nothing on the per-frame path returns one of these. Errors only surface
/// while loading segment documents or configuration.
#[derive(thiserror::Error, Debug)]
pub enum FilError {
    /// The segment document is missing, unreadable, or structurally malformed.
    #[error("load error: {0}")]
    Load(String),

    /// Invalid caller-provided values (ids out of range, bad dimensions).
    #[error("validation error: {0}")]
    Validation(String),

    /// Rejected sequencer configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl FilError {
    /// Build a [`FilError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`FilError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FilError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FilError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FilError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
