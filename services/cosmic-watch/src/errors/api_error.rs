use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::errors::NeoError;

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub trace_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub trace_id: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            trace_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new("DATABASE_ERROR", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new("UPSTREAM_ERROR", message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new("RATE_LIMIT_EXCEEDED", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "VALIDATION_ERROR" => StatusCode::UNPROCESSABLE_ENTITY,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "UPSTREAM_ERROR" => StatusCode::BAD_GATEWAY,
            "RATE_LIMIT_EXCEEDED" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} (trace_id: {})", self.code, self.message, self.trace_id)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_response = ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: self.code,
                message: self.message,
                trace_id: self.trace_id,
            },
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<NeoError> for ApiError {
    fn from(err: NeoError) -> Self {
        // Every variant comes from upstream data, which the caller cannot fix
        tracing::error!("Upstream feed error: {:?}", err);
        ApiError::upstream(err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        ApiError::database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::validation(format!("Invalid request: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_http_status() {
        assert_eq!(ApiError::upstream("x").status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ApiError::validation("x").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::rate_limit("x").status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::database("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn feed_errors_are_upstream_errors() {
        let err: ApiError = NeoError::validation("miss_distance_km", "far").into();
        assert_eq!(err.code, "UPSTREAM_ERROR");
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err: ApiError = NeoError::UpstreamStatus { status: 503 }.into();
        assert_eq!(err.code, "UPSTREAM_ERROR");

        let err: ApiError = NeoError::decode("missing near_earth_objects").into();
        assert_eq!(err.code, "UPSTREAM_ERROR");
    }

    #[test]
    fn request_body_validation_stays_unprocessable() {
        use validator::Validate;

        let input = crate::domain::WatchlistInput {
            asteroid_id: String::new(),
            name: "(2010 PK9)".to_string(),
        };
        let err: ApiError = input.validate().unwrap_err().into();
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn every_error_gets_a_trace_id() {
        let a = ApiError::internal("boom");
        let b = ApiError::internal("boom");
        assert_ne!(a.trace_id, b.trace_id);
        assert!(a.to_string().contains(&a.trace_id));
    }
}
