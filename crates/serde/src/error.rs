//! Error types for DFe serialization and deserialization.
//!
//! Only conditions that stop a call before any output is produced live here.
//! Structural problems found while walking a document (missing required
//! fields, cardinality, conversion failures) are reported as
//! [`Alert`](crate::alert::Alert)s instead.

use thiserror::Error;

/// Fatal errors raised by the serializer facade.
#[derive(Error, Debug)]
pub enum DfeError {
    /// The model type cannot be bound as a document root.
    #[error("cannot bind {type_name} as a DFe document: {reason}")]
    Configuration { type_name: String, reason: String },

    /// The instance handed to a call is not of the bound type.
    #[error("type mismatch: serializer is bound to {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// XML syntax error while reading a document.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute while reading a document.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Well-formed tokens that do not make a single-rooted document.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// Document bytes are not valid UTF-8.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// IO error from the byte sink or source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DfeError {
    pub(crate) fn configuration(type_name: &str, reason: impl Into<String>) -> Self {
        DfeError::Configuration {
            type_name: type_name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<std::string::FromUtf8Error> for DfeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        DfeError::Encoding(err.to_string())
    }
}

impl From<std::str::Utf8Error> for DfeError {
    fn from(err: std::str::Utf8Error) -> Self {
        DfeError::Encoding(err.to_string())
    }
}

/// Result type alias for DFe serialization operations
pub type Result<T> = std::result::Result<T, DfeError>;
