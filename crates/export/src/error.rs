//! Export error model.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors raised while rendering or committing an export.
///
/// Rendering happens in memory before anything reaches a sink, so every
/// variant except [`ExportError::SinkWrite`] leaves the destination untouched.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Strict mode was requested and the bill has no items.
    #[error("bill has no items (strict mode)")]
    EmptyCollection,

    /// The requested format token is not one of the supported formats.
    #[error("unsupported export format: {0} (expected excel, csv, xml or json)")]
    UnsupportedFormat(String),

    /// The destination could not be written.
    #[error("failed to write export: {0}")]
    SinkWrite(#[from] std::io::Error),

    /// A serializer failed while encoding into the in-memory buffer.
    #[error("failed to encode export: {0}")]
    Encode(String),
}

impl ExportError {
    pub fn unsupported_format(token: impl Into<String>) -> Self {
        Self::UnsupportedFormat(token.into())
    }

    pub fn encode(msg: impl core::fmt::Display) -> Self {
        Self::Encode(msg.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::encode(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::encode(err)
    }
}
