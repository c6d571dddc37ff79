use thiserror::Error;

/// Failures that escape a conversion.
///
/// Structurally unusual input (cycles, functions, host objects, excess depth)
/// never produces one of these. Only code supplied by the caller can: a
/// property getter or a `to_json` hook that fails is passed through as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// A value raised by a getter or hook.
    #[error("{0}")]
    Thrown(String),

    #[error("property `{key}` threw: {reason}")]
    Getter { key: String, reason: String },

    /// Raised only while rendering JSON text, never by the traversal.
    #[error("Converting circular structure to JSON")]
    CircularStructure,

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl ConvertError {
    /// Shorthand for raising an arbitrary message from a getter or hook.
    pub fn thrown(message: impl Into<String>) -> Self {
        ConvertError::Thrown(message.into())
    }
}
