//! Station library error types.

use crate::domain::TimeError;
use crate::provider::ProviderError;

/// An upstream record lacks or garbles a field the mapper needs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// Required field not present on the record
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Field present but not an integer
    #[error("invalid number in field {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// Departure time or date could not be parsed
    #[error(transparent)]
    InvalidTime(#[from] TimeError),
}

/// Errors from station library operations.
///
/// Provider failures are passed through untouched.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MappingError::MissingField("id");
        assert_eq!(err.to_string(), "missing required field: id");

        let err = MappingError::InvalidNumber {
            field: "x",
            value: "12.5".into(),
        };
        assert_eq!(err.to_string(), "invalid number in field x: \"12.5\"");

        let err = LibraryError::from(ProviderError::Upstream("no such stop".into()));
        assert_eq!(err.to_string(), "upstream error: no such stop");
    }
}
