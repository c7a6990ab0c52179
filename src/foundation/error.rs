/// Convenience result type used across polytrace.
pub type PolytraceResult<T> = Result<T, PolytraceError>;

/// Top-level error taxonomy used by extraction, rendering and encoding APIs.
///
/// Per-block parse problems are not errors: they are reported as
/// [`BlockSkip`](crate::BlockSkip) outcomes and absorbed by the extractor.
#[derive(thiserror::Error, Debug)]
pub enum PolytraceError {
    /// The input text-block stream could not be obtained.
    #[error("source unreadable: {0}")]
    SourceUnreadable(String),

    /// The drawing contains no points at all, so there is nothing to render.
    #[error("empty drawing: no renderable points")]
    EmptyDrawing,

    /// The rasterization surface failed mid-render.
    #[error("render backend error: {0}")]
    RenderBackend(String),

    /// Invalid user-provided options or misuse of an API contract.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while encoding frames into an output artifact.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PolytraceError {
    /// Build a [`PolytraceError::SourceUnreadable`] value.
    pub fn source_unreadable(msg: impl Into<String>) -> Self {
        Self::SourceUnreadable(msg.into())
    }

    /// Build a [`PolytraceError::RenderBackend`] value.
    pub fn render_backend(msg: impl Into<String>) -> Self {
        Self::RenderBackend(msg.into())
    }

    /// Build a [`PolytraceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PolytraceError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PolytraceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
