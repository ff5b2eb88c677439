use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::constants::{INTERNAL_ERROR_MESSAGE, INVALID_FORM_MESSAGE, INVALID_TYPE_MESSAGE};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to create log directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open log file in '{path}': {source}")]
    Appender {
        path: PathBuf,
        #[source]
        source: tracing_appender::rolling::InitError,
    },
}

/// Startup failures while loading the normalizer or classifier. All fatal.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read artifact '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{artifact} feature order mismatch at position {position}: expected '{expected}', found '{found}'")]
    FeatureOrder {
        artifact: &'static str,
        position: usize,
        expected: String,
        found: String,
    },

    #[error("{artifact} is invalid: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },
}

/// Failures inside the normalizer or classifier while serving a request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("{stage} expected {expected} features, got {actual}")]
    Dimension {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{stage} produced a non-finite value")]
    NonFinite { stage: &'static str },
}

/// Per-request failure taxonomy for `POST /predict`.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unrecognized category for {field}: '{value}'")]
    UnrecognizedCategory { field: &'static str, value: String },

    #[error("Malformed numeric value for {field}: '{value}'")]
    MalformedNumeric { field: &'static str, value: String },

    #[error("Undecodable form body: {0}")]
    Form(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Internal failure: {0}")]
    Internal(String),
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::Model(_) | PredictError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Short tag used as a metrics label.
    pub fn reason(&self) -> &'static str {
        match self {
            PredictError::MissingField(_) => "missing_field",
            PredictError::UnrecognizedCategory { .. } => "unrecognized_category",
            PredictError::MalformedNumeric { .. } => "malformed_numeric",
            PredictError::Form(_) => "undecodable_form",
            PredictError::Model(_) => "model",
            PredictError::Internal(_) => "internal",
        }
    }

    /// Body shown to the user. Never carries internal detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            PredictError::MissingField(_)
            | PredictError::UnrecognizedCategory { .. }
            | PredictError::Form(_) => INVALID_FORM_MESSAGE,
            PredictError::MalformedNumeric { .. } => INVALID_TYPE_MESSAGE,
            PredictError::Model(_) | PredictError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            tracing::error!(error = %self, "Prediction failed");
        } else {
            tracing::warn!(error = %self, "Rejected prediction request");
        }
        (self.status(), self.public_message()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let missing = PredictError::MissingField("Gender");
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.public_message(), INVALID_FORM_MESSAGE);

        let numeric = PredictError::MalformedNumeric {
            field: "Customer_rating",
            value: "x".to_string(),
        };
        assert_eq!(numeric.status(), StatusCode::BAD_REQUEST);
        assert_eq!(numeric.public_message(), INVALID_TYPE_MESSAGE);
    }

    #[test]
    fn model_errors_hide_detail() {
        let err = PredictError::from(ModelError::Dimension {
            stage: "normalizer",
            expected: 10,
            actual: 9,
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal Server Error");
    }
}
