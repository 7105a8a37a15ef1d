//! Checker configuration

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Serialized [`crate::CheckReport`]
    Json,
}

/// Options for a `check` run
#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    /// Unknown tags under `<properties>` fail the check
    pub strict: bool,
    /// Report format
    pub format: OutputFormat,
    /// Embed the built properties in the report
    pub include_properties: bool,
}

impl CheckConfig {
    /// Create default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: strict mode
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builder: output format
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder: embed built properties
    #[must_use]
    pub fn with_properties(mut self, include: bool) -> Self {
        self.include_properties = include;
        self
    }
}
