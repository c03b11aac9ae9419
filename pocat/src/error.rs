//! All error types for the pocat crate.
//!
//! These are returned from fallible operations (reading catalogs, validating
//! options, encoding output). Per-message format problems are not errors; see
//! [`crate::check`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("impossible selection criteria specified ({more_than} < n < {less_than})")]
    InvalidSelection { more_than: usize, less_than: usize },

    #[error("{first} and {second} are mutually exclusive")]
    ConflictingOptions {
        first: &'static str,
        second: &'static str,
    },

    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),

    #[error("unknown output syntax `{0}`")]
    UnknownSyntax(String),

    #[error("no writer available for output syntax `{0}`")]
    UnsupportedSyntax(String),

    #[error("cannot encode output as {encoding}: {message}")]
    Encoding { encoding: String, message: String },

    #[error("cannot write output as {0}: encoding is not supported for output")]
    UnsupportedEncoding(String),
}

impl Error {
    /// Creates an error for two options that cannot be combined.
    pub fn conflicting_options(first: &'static str, second: &'static str) -> Self {
        Error::ConflictingOptions { first, second }
    }

    /// Returns true for errors raised while validating configuration, before
    /// any catalog has been touched.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidSelection { .. }
                | Error::ConflictingOptions { .. }
                | Error::UnknownEncoding(_)
                | Error::UnsupportedEncoding(_)
                | Error::UnknownSyntax(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_parse_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::Parse(json_error);
        assert!(error.to_string().contains("parse error"));
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
        assert!(!error.is_configuration_error());
    }

    #[test]
    fn test_invalid_selection_error() {
        let error = Error::InvalidSelection {
            more_than: 5,
            less_than: 3,
        };
        assert_eq!(
            error.to_string(),
            "impossible selection criteria specified (5 < n < 3)"
        );
        assert!(error.is_configuration_error());
    }

    #[test]
    fn test_conflicting_options_error() {
        let error = Error::conflicting_options("--sort-output", "--sort-by-file");
        assert_eq!(
            error.to_string(),
            "--sort-output and --sort-by-file are mutually exclusive"
        );
        assert!(error.is_configuration_error());
    }

    #[test]
    fn test_encoding_errors() {
        let error = Error::UnknownEncoding("klingon".to_string());
        assert_eq!(error.to_string(), "unknown encoding `klingon`");

        let error = Error::Encoding {
            encoding: "ISO-8859-1".to_string(),
            message: "unmappable character".to_string(),
        };
        assert!(error.to_string().contains("ISO-8859-1"));
    }

    #[test]
    fn test_unsupported_encoding_is_configuration_error() {
        let error = Error::UnsupportedEncoding("UTF-16LE".to_string());
        assert!(error.to_string().contains("UTF-16LE"));
        assert!(error.is_configuration_error());

        let error = Error::Encoding {
            encoding: "ISO-8859-1".to_string(),
            message: "cannot represent 'с'".to_string(),
        };
        assert!(!error.is_configuration_error());
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownSyntax("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownSyntax"));
        assert!(debug.contains("test"));
    }
}
