//! Maps `AppError` onto HTTP responses.
//!
//! Every variant becomes a structured `ErrorResponse` with a stable code.
//! Internal variants never leak their source chain to the client; the
//! full error is logged server-side instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let body = match &self {
            AppError::NotFound { entity, field, value } => {
                ErrorResponse::new(error_to_code(&self), &self.to_string()).with_details(json!({
                    "entity": entity,
                    "field": field,
                    "value": value,
                }))
            }
            AppError::Duplicate { entity, field, value } => {
                ErrorResponse::new(error_to_code(&self), &self.to_string()).with_details(json!({
                    "entity": entity,
                    "field": field,
                    "value": value,
                }))
            }
            AppError::Validation { field, reason } => {
                ErrorResponse::new(error_to_code(&self), &self.to_string()).with_details(json!({
                    "fields": [{ "field": field, "message": reason }],
                }))
            }
            AppError::ValidationErrors { errors } => {
                let fields: Vec<_> = errors
                    .iter()
                    .map(|e| json!({ "field": e.field, "message": e.message }))
                    .collect();
                ErrorResponse::new(error_to_code(&self), "Request validation failed")
                    .with_details(json!({ "fields": fields }))
            }
            AppError::SourceUnavailable { name, .. } => {
                ErrorResponse::new(error_to_code(&self), &self.to_string())
                    .with_details(json!({ "source": name }))
            }
            AppError::Automation { stage, .. } => {
                ErrorResponse::new(error_to_code(&self), &self.to_string())
                    .with_details(json!({ "stage": stage }))
            }
            AppError::BadRequest { .. }
            | AppError::UnprocessableContent { .. }
            | AppError::Unauthorized { .. }
            | AppError::Forbidden { .. }
            | AppError::ResumeParse { .. } => {
                ErrorResponse::new(error_to_code(&self), &self.to_string())
            }
            // Internal details stay in the logs.
            AppError::Database { .. } => {
                ErrorResponse::new(error_to_code(&self), "Database operation failed")
            }
            AppError::Configuration { key, .. } => {
                ErrorResponse::new(error_to_code(&self), &format!("Configuration error: {key}"))
            }
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new(error_to_code(&self), "Database connection unavailable")
            }
            AppError::Internal { .. } => {
                ErrorResponse::new(error_to_code(&self), "An internal error occurred")
            }
        };

        (status, Json(body)).into_response()
    }
}

pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::UnprocessableContent { .. } | AppError::ResumeParse { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AppError::SourceUnavailable { .. } | AppError::ConnectionPool { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        AppError::Automation { .. }
        | AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::UnprocessableContent { .. } => "UNPROCESSABLE_CONTENT",
        AppError::Unauthorized { .. } => "UNAUTHORIZED",
        AppError::Forbidden { .. } => "FORBIDDEN",
        AppError::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
        AppError::Automation { .. } => "AUTOMATION_ERROR",
        AppError::ResumeParse { .. } => "RESUME_PARSE_ERROR",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;

    #[test]
    fn not_found_maps_to_404() {
        let error = AppError::NotFound {
            entity: "JobApplication".to_string(),
            field: "id".to_string(),
            value: "42".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::NOT_FOUND);
        assert_eq!(error_to_code(&error), "NOT_FOUND");
    }

    #[test]
    fn duplicate_maps_to_409() {
        let error = AppError::Duplicate {
            entity: "JobApplication".to_string(),
            field: "url".to_string(),
            value: "https://example.com/job/1".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::CONFLICT);
        assert_eq!(error_to_code(&error), "DUPLICATE_ENTRY");
    }

    #[test]
    fn validation_errors_map_to_400() {
        let error = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            }],
        };
        assert_eq!(error_to_status_code(&error), StatusCode::BAD_REQUEST);
        assert_eq!(error_to_code(&error), "VALIDATION_ERROR");
    }

    #[test]
    fn source_unavailable_maps_to_503() {
        let error = AppError::SourceUnavailable {
            name: "linkedin".to_string(),
            reason: "timeout".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error_to_code(&error), "SOURCE_UNAVAILABLE");
    }

    #[test]
    fn resume_parse_maps_to_422() {
        let error = AppError::ResumeParse {
            reason: "encrypted PDF".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_to_code(&error), "RESUME_PARSE_ERROR");
    }

    #[test]
    fn internal_errors_are_sanitized() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("secret connection string leaked"),
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn automation_maps_to_500() {
        let error = AppError::Automation {
            stage: "navigation".to_string(),
            message: "timeout".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_to_code(&error), "AUTOMATION_ERROR");
    }
}
