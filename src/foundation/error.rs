/// Convenience result type used across hearmeout.
pub type PartyResult<T> = Result<T, PartyError>;

/// Top-level error taxonomy for the fallible plumbing of the pipeline.
///
/// External-dependency failures (search provider, downloads, fonts) never surface here: they are
/// absorbed by the fallback chain. What remains are caller mistakes and local I/O failures.
#[derive(thiserror::Error, Debug)]
pub enum PartyError {
    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while writing or reading the on-disk entry store.
    #[error("storage error: {0}")]
    Storage(String),

    /// Errors when serializing or deserializing records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PartyError {
    /// Build a [`PartyError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PartyError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`PartyError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
