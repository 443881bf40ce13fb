//! Shared error type across fishroom crates.

use thiserror::Error;

/// Stable error-kind codes (logs, test vectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed color shape.
    ColorStructure,
    /// Style list is not a list of names.
    StyleList,
    /// Malformed rich-text run or nested style record.
    RichTextStructure,
    /// Enumerated field outside its value set.
    EnumConstraint,
    /// Wrong primitive type for an envelope field.
    FieldType,
    /// Wire text is not a JSON object at all.
    Payload,
}

impl ErrorKind {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ColorStructure => "COLOR_STRUCTURE",
            ErrorKind::StyleList => "STYLE_LIST",
            ErrorKind::RichTextStructure => "RICH_TEXT_STRUCTURE",
            ErrorKind::EnumConstraint => "ENUM_CONSTRAINT",
            ErrorKind::FieldType => "FIELD_TYPE",
            ErrorKind::Payload => "PAYLOAD",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FishroomError>;

/// Unified error type for the envelope and its nested codecs.
///
/// The lossy decode entry point discards these in favor of the error
/// sentinel; every other path reports the exact kind.
#[derive(Debug, Error)]
pub enum FishroomError {
    #[error("malformed color: {0}")]
    ColorStructure(String),
    #[error("invalid style list: {0}")]
    StyleList(String),
    #[error("malformed rich text: {0}")]
    RichTextStructure(String),
    #[error("{field}: {value:?} is outside the enumeration")]
    EnumConstraint {
        field: &'static str,
        value: String,
    },
    #[error("{field}: expected {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("invalid message payload: {0}")]
    Payload(String),
}

impl FishroomError {
    /// Map the error to its stable kind code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FishroomError::ColorStructure(_) => ErrorKind::ColorStructure,
            FishroomError::StyleList(_) => ErrorKind::StyleList,
            FishroomError::RichTextStructure(_) => ErrorKind::RichTextStructure,
            FishroomError::EnumConstraint { .. } => ErrorKind::EnumConstraint,
            FishroomError::FieldType { .. } => ErrorKind::FieldType,
            FishroomError::Payload(_) => ErrorKind::Payload,
        }
    }
}
