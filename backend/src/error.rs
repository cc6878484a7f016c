//! Error handling for the Power Consumption Dashboard server
//!
//! Interaction endpoints degrade to empty payloads on their own; what reaches
//! this type is either a malformed request or a genuine server fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::DashboardError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Invalid parameter {field}: {message}")]
    InvalidParameter { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Core errors
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

impl AppError {
    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidParameter { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_PARAMETER".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::Dashboard(err) => match err {
                DashboardError::UnknownMonth(name) => (
                    StatusCode::BAD_REQUEST,
                    ErrorDetail {
                        code: "UNKNOWN_MONTH".to_string(),
                        message: format!("Unknown month name: {}", name),
                        field: Some("months".to_string()),
                    },
                ),
                DashboardError::UnknownMeasure(name) => (
                    StatusCode::BAD_REQUEST,
                    ErrorDetail {
                        code: "UNKNOWN_MEASURE".to_string(),
                        message: format!("Unknown measure: {}", name),
                        field: None,
                    },
                ),
                DashboardError::InvalidDateComponents(msg) => (
                    StatusCode::BAD_REQUEST,
                    ErrorDetail {
                        code: "INVALID_DATE_COMPONENTS".to_string(),
                        message: msg.clone(),
                        field: None,
                    },
                ),
                DashboardError::EmptyGroup(scope) => (
                    StatusCode::NOT_FOUND,
                    ErrorDetail {
                        code: "NO_DATA".to_string(),
                        message: format!("No data for {}", scope),
                        field: None,
                    },
                ),
                DashboardError::MalformedRow { .. }
                | DashboardError::Io(_)
                | DashboardError::Csv(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetail {
                        code: "DATASET_ERROR".to_string(),
                        message: "The dataset could not be read".to_string(),
                        field: None,
                    },
                ),
            },
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
