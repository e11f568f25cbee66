use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed with status {0}")]
    RequestFailed(StatusCode),

    #[error("Client is missing required configuration: {0}")]
    MissingConfig(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Data error: {0}")]
    DataError(#[from] DataError),

    #[error("Date/time error: {0}")]
    DateTimeError(#[from] DateTimeError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Status code carried by a [`ClientError::RequestFailed`], if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestFailed(status) => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl DataError {
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DateTimeError {
    #[error("Failed to parse date '{input}': {reason}")]
    ParseError { input: String, reason: String },
}

impl DateTimeError {
    pub fn parse_error(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseError {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Violations of the `news` collection validator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Document must be an object")]
    NotAnObject,

    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Field '{field}' must be of bsonType '{expected}'")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
}
