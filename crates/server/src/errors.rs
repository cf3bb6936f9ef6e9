use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::validation::ValidationErrors;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

use crate::response::{ApiResponse, Reply};

/// Error half of every handler; renders as the failure envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errs) => ApiError::Validation(errs),
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::Conflict(msg) => ApiError::Conflict(msg),
            ServiceError::Db(msg) | ServiceError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errs: ValidationErrors) -> Self { ApiError::Validation(errs) }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(event = "body_rejected", reason = %rejection.body_text());
        let mut errs = ValidationErrors::new();
        errs.add("body", "json", "The request body must be a valid JSON object.");
        ApiError::Validation(errs)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errs) => ApiResponse::failure("Validation failed", Some(errs)),
            ApiError::NotFound(msg) | ApiError::Conflict(msg) => ApiResponse::failure(msg, None),
            ApiError::Internal(detail) => {
                error!(event = "request_failed", error = %detail, "internal error");
                ApiResponse::failure("An unexpected error occurred.", None)
            }
        };
        Reply(status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation(ValidationErrors::new()), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::NotFound("Sender not found".into()), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("blocked".into()), StatusCode::CONFLICT),
            (ServiceError::Db("pool closed".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Internal("bug".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[tokio::test]
    async fn internal_detail_is_not_exposed() {
        let res = ApiError::Internal("password authentication failed for user".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["message"], "An unexpected error occurred.");
        assert!(!String::from_utf8_lossy(&bytes).contains("password"));
    }

    #[tokio::test]
    async fn constraint_conflicts_answer_409() {
        let err = ServiceError::Conflict("The request conflicts with existing records.".into());
        let res = ApiError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "success": false,
                "message": "The request conflicts with existing records.",
                "data": null
            })
        );
    }
}
