//! Error types for the public API.
//!
//! Internally the crate uses `anyhow` (see `Re`). At the public boundary errors are tagged with an
//! `ErrorType` so that callers can tell a rejected submission from a failed write.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// Internal result type.
pub(crate) type Re<T> = anyhow::Result<T>;

/// Public result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The category of an `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The submitted amount or category is invalid.
    Validation,
    /// The expense to update does not exist.
    NotFound,
    /// The expense set could not be written to storage.
    Persistence,
    /// The data directory or its configuration file is missing or invalid.
    Config,
    /// The CSV export could not be written.
    Export,
    /// A confirmation prompt could not be shown or answered.
    Input,
    /// An operation returned an outcome its caller does not expect. This indicates a bug.
    Internal,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// An error returned from a public function, carrying an `ErrorType` along with the underlying
/// `anyhow::Error` chain.
pub struct Error {
    error_type: ErrorType,
    source: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, source: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            source: source.into(),
        }
    }

    /// Creates an error from a plain message.
    pub fn msg(error_type: ErrorType, message: impl Display) -> Self {
        Self::new(error_type, anyhow::anyhow!("{message}"))
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.source)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:#}", self.error_type, self.source)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let source: &(dyn std::error::Error + 'static) = self.source.as_ref();
        Some(source)
    }
}

/// Converts an internal result into a public `Result` by tagging the error with an `ErrorType`.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_pub_result_tags_error() {
        let r: Re<()> = Err(anyhow::anyhow!("disk full")).context("Unable to write expenses");
        let err = r.pub_result(ErrorType::Persistence).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Persistence);
        let message = err.to_string();
        assert!(message.starts_with("persistence error"), "{message}");
        assert!(message.contains("Unable to write expenses"), "{message}");
        assert!(message.contains("disk full"), "{message}");
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(ErrorType::NotFound.to_string(), "not_found");
        assert_eq!(ErrorType::Validation.to_string(), "validation");
        assert_eq!(ErrorType::Internal.to_string(), "internal");
    }
}
