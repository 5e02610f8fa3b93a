/// Convenience result type used across Foliopress.
pub type FolioResult<T> = Result<T, FolioError>;

/// Top-level error taxonomy used by assembly APIs.
#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    /// Violated precondition on user-provided data (e.g. no current edition).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed source record rows that cannot be coerced into the model.
    #[error("record error: {0}")]
    Record(String),

    /// Errors while laying out or compositing the cover.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing JSON rows and bundles.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FolioError {
    /// Build a [`FolioError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FolioError::Record`] value.
    pub fn record(msg: impl Into<String>) -> Self {
        Self::Record(msg.into())
    }

    /// Build a [`FolioError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
