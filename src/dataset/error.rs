//! Dataset error types
//!
//! Everything that can go wrong between "fetch the document" and "hold a
//! typed, read-only dataset in memory".

use thiserror::Error;

/// Errors that can occur while loading or decoding the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Reading the dataset from disk failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetching the dataset over HTTP failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// The document is not valid JSON or does not have the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A `yearDate` value could not be read as a date
    #[error("Invalid date for year {year}: {value:?}")]
    InvalidDate { year: i32, value: String },

    /// A record has no readable `year`
    #[error("Record has no readable year")]
    MissingYear,

    /// A category, equipment, tested or filter key is not recognised
    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for DatasetError {
    fn from(err: reqwest::Error) -> Self {
        DatasetError::Http(err.to_string())
    }
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::UnknownKey("equipment_foo".to_string());
        assert_eq!(err.to_string(), "Unknown key: equipment_foo");

        let err = DatasetError::InvalidDate {
            year: 1999,
            value: "yesterday".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid date for year 1999: \"yesterday\"");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DatasetError = json_err.into();
        assert!(matches!(err, DatasetError::Parse(_)));
    }
}
