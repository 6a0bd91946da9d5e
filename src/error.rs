//! Error types for csvstream

use thiserror::Error;

/// Errors raised by the CSV reader and writer
///
/// The tokenizer never rejects structurally odd input, so there is no
/// "malformed CSV" variant. Failures come from the underlying stream or
/// from configuration.
#[derive(Error, Debug)]
pub enum CsvError {
    /// I/O error from the underlying stream, passed through untouched
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding label not recognised by `encoding_rs`
    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),
}

impl CsvError {
    /// Borrow the underlying I/O error, if this is one
    pub fn as_io(&self) -> Option<&std::io::Error> {
        match self {
            CsvError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for csvstream operations
pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_is_preserved() {
        let err: CsvError = io::Error::new(io::ErrorKind::NotFound, "missing.csv").into();
        assert_eq!(err.as_io().map(|e| e.kind()), Some(io::ErrorKind::NotFound));
        assert_eq!(err.to_string(), "IO error: missing.csv");
    }

    #[test]
    fn test_unknown_encoding_message() {
        let err = CsvError::UnknownEncoding("klingon".to_string());
        assert!(err.as_io().is_none());
        assert_eq!(err.to_string(), "Unknown encoding label: klingon");
    }
}
