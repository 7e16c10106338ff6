//! Error types for the chart object model.
//!
//! Every failure is surfaced to the caller immediately. None of them is
//! recovered locally: each one is either a programming error or invalid
//! input that only the caller can correct.

use thiserror::Error;

/// Main error type for the chart object model.
#[derive(Debug, Error)]
pub enum OxmlError {
    /// A structural invariant guaranteed by construction was broken.
    #[error("Schema violation in <{element}>: {detail}")]
    SchemaViolation { element: String, detail: String },

    /// Caller supplied an out-of-domain value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An attribute codec rejected a value.
    #[error("Invalid value '{value}' for attribute '{attribute}': {reason}")]
    InvalidValue {
        attribute: String,
        value: String,
        reason: String,
    },

    /// A lookup or removal targeted a node that is not there.
    #[error("Not found: <{child}> is not a child of <{parent}>")]
    NotFound { parent: String, child: String },

    /// Prefix or namespace URI outside the known table.
    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// XML writing failed.
    #[error("XML writing failed: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    /// Serialized output was not valid UTF-8.
    #[error("Serialized XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl OxmlError {
    pub(crate) fn schema(element: impl Into<String>, detail: impl Into<String>) -> Self {
        let err = Self::SchemaViolation {
            element: element.into(),
            detail: detail.into(),
        };
        tracing::warn!(error = %err, "schema violation");
        err
    }

    pub(crate) fn invalid_value(
        attribute: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            attribute: attribute.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for object model operations.
pub type Result<T> = std::result::Result<T, OxmlError>;
