//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mortgage_core::MortgageError;
use thiserror::Error;
use tracing::error;

use crate::form::FormError;

/// Server-specific errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Invalid request
    #[error("{0}")]
    BadRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServerError::BadRequest(msg) => msg.clone(),
            ServerError::Internal(msg) => {
                error!(error = %msg, "request failed");
                "failed to generate document".to_string()
            }
        };

        (status, message).into_response()
    }
}

impl From<MortgageError> for ServerError {
    fn from(e: MortgageError) -> Self {
        if e.is_client_error() {
            ServerError::BadRequest(e.to_string())
        } else {
            ServerError::Internal(e.to_string())
        }
    }
}

impl From<FormError> for ServerError {
    fn from(e: FormError) -> Self {
        match e {
            FormError::Terms(inner) => inner.into(),
            other => ServerError::BadRequest(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_terms_map_to_bad_request() {
        let err: ServerError = MortgageError::InvalidInput {
            field: "months".into(),
            reason: "must be at least 1".into(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid months: must be at least 1");
    }

    #[test]
    fn test_render_failure_maps_to_internal() {
        let err: ServerError = MortgageError::Render("pdf: font".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_field_maps_to_bad_request() {
        let err: ServerError = FormError::Missing("rate").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "missing field: rate");
    }
}
