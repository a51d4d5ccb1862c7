//! Error types for granulo-api

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias for granulo-api operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur in granulo-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// The request body is malformed, or a field is missing or non-numeric.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Offending field, when the problem is tied to one
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// Error from granulo-core
    #[error("{0}")]
    Domain(#[from] granulo_core::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error (config files, socket binding)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Creates a request error tied to a field.
    pub fn invalid_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        ApiError::InvalidRequest {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a request error not tied to any field.
    pub fn invalid_request<M: Into<String>>(message: M) -> Self {
        ApiError::InvalidRequest {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        ApiError::Config {
            message: message.into(),
        }
    }

    /// Machine-readable category reported in the error body.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest { .. } => "invalid_request",
            ApiError::Domain(err) => match err {
                granulo_core::Error::InvalidTotalMass { .. } => "invalid_total_mass",
                granulo_core::Error::MissingReferenceSieve { .. } => "missing_reference_sieve",
                granulo_core::Error::InvalidInput { .. } => "invalid_input",
                granulo_core::Error::EntryNotFound { .. } => "entry_not_found",
                _ => "internal",
            },
            ApiError::Config { .. } => "configuration",
            ApiError::Io(_) => "internal",
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Domain(granulo_core::Error::MissingReferenceSieve { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Domain(err) if err.is_domain() => StatusCode::BAD_REQUEST,
            ApiError::Domain(_) | ApiError::Config { .. } | ApiError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Field named in the error body, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ApiError::InvalidRequest { field, .. } => field.as_deref(),
            ApiError::Domain(err) => err.field(),
            _ => None,
        }
    }

    /// Human-readable message reported in the error body.
    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidRequest { message, .. } => message.clone(),
            ApiError::Domain(granulo_core::Error::InvalidInput { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, category = self.category(), "Request rejected");
        }

        let body = serde_json::json!({
            "error": {
                "category": self.category(),
                "field": self.field(),
                "message": self.message(),
            }
        });

        (status, Json(body)).into_response()
    }
}
