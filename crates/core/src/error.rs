//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The reconciliation core absorbs every one of these locally (degrading to
/// "no propagation" or a pass-through value); they exist so the degradation is
/// typed and can be logged, not so they reach the form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An item references an identifier with no persisted record.
    #[error("missing reference: {0}")]
    MissingReference(String),

    /// A quantity-change ratio could not be derived (missing or zero quantity).
    #[error("ambiguous ratio: {0}")]
    AmbiguousRatio(String),

    /// The submitted payload does not have the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A value failed validation.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn missing_reference(msg: impl Into<String>) -> Self {
        Self::MissingReference(msg.into())
    }

    pub fn ambiguous_ratio(msg: impl Into<String>) -> Self {
        Self::AmbiguousRatio(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingReference(_) => "missing_reference",
            Self::AmbiguousRatio(_) => "ambiguous_ratio",
            Self::MalformedInput(_) => "malformed_input",
            Self::InvalidId(_) => "invalid_id",
            Self::Validation(_) => "validation",
        }
    }
}
