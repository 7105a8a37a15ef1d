//! Error types for the property model
//!
//! Two construction failure tiers are raised as errors:
//! - [`PropertyError::InvalidValue`]: a value fails type/format validation and
//!   has no sensible default
//! - [`PropertyError::InvalidConfiguration`]: a kind-specific field is
//!   structurally wrong and cannot be repaired
//!
//! Cosmetic bad input is never an error. It is repaired during construction and
//! reported through `tracing::warn!`.

/// Errors raised while parsing or writing XML
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XmlError {
    /// Input is not well-formed XML
    #[error("malformed xml {0}")]
    Malformed(String),

    /// Input contains no root element
    #[error("xml document has no root element")]
    NoRoot,

    /// Closing tag without a matching opening tag, or unclosed element at EOF
    #[error("unbalanced xml element: {0}")]
    Unbalanced(String),

    /// Writer failure
    #[error("xml write failed: {0}")]
    Write(String),
}

impl XmlError {
    pub(crate) fn malformed(position: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        Self::Malformed(format!("at byte {position}: {err}"))
    }

    pub(crate) fn write(err: impl std::fmt::Display) -> Self {
        Self::Write(err.to_string())
    }
}

/// Errors raised while constructing properties
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    /// Value fails type/format validation
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Kind-specific configuration is structurally wrong
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// XML input could not be read
    #[error("xml error: {0}")]
    Xml(#[from] XmlError),
}

impl PropertyError {
    /// Create an invalid value error
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// True for the `InvalidValue` tier
    #[inline]
    #[must_use]
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidValue(_))
    }

    /// True for the `InvalidConfiguration` tier
    #[inline]
    #[must_use]
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

/// Result type alias for property operations
pub type PropertyResult<T> = Result<T, PropertyError>;
