/// Crate-wide result alias.
pub type ChalkResult<T> = Result<T, ChalkError>;

/// Errors raised at the fallible boundaries of the crate (parsing, validation, rasterization).
///
/// Playback transport never returns these; surface failures during playback are logged instead.
#[derive(thiserror::Error, Debug)]
pub enum ChalkError {
    /// Storyboard or option data violates an invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A drawing surface could not produce or store a frame.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChalkError {
    /// Build a [`ChalkError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChalkError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ChalkError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ChalkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
