/// Convenience result type used across gifsketch.
pub type GifSketchResult<T> = Result<T, GifSketchError>;

/// Top-level error taxonomy used by the pipeline stages.
#[derive(thiserror::Error, Debug)]
pub enum GifSketchError {
    /// A file or directory could not be found, read, or written.
    #[error("io error: {0}")]
    Io(String),

    /// An image or text payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Input did not have the expected shape (filename pattern, array initializer).
    #[error("pattern mismatch: {0}")]
    PatternMismatch(String),

    /// The sketch template lacks a required placeholder line.
    #[error("missing placeholder: {0}")]
    MissingPlaceholder(String),

    /// Invalid user-provided options or an empty input set.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GifSketchError {
    /// Build a [`GifSketchError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`GifSketchError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`GifSketchError::PatternMismatch`] value.
    pub fn pattern_mismatch(msg: impl Into<String>) -> Self {
        Self::PatternMismatch(msg.into())
    }

    /// Build a [`GifSketchError::MissingPlaceholder`] value.
    pub fn missing_placeholder(msg: impl Into<String>) -> Self {
        Self::MissingPlaceholder(msg.into())
    }

    /// Build a [`GifSketchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
