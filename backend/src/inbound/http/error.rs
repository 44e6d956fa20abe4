//! HTTP error envelope and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns: [`DomainError`] values are
//! translated into Actix responses here. Internal failures are logged with
//! their diagnostics and surfaced to clients with a generic message only.

use std::fmt;

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DomainError, ErrorCode};

/// Result alias for REST handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// REST adapter error wrapping a [`DomainError`].
#[derive(Debug, Clone)]
pub struct ApiError(DomainError);

/// Serialized error envelope: the legacy `success`/`message`/`errors`
/// fields plus a stable machine-readable `code`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false` for errors.
    pub success: bool,
    /// Stable failure category.
    #[schema(example = "invalid_request")]
    pub code: ErrorCode,
    /// Human-readable summary.
    pub message: String,
    /// Itemized rule failures for validation responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        Self {
            success: false,
            code: err.code(),
            message: err.message().to_owned(),
            errors: err.errors().map(<[String]>::to_vec),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.0.code() == ErrorCode::InternalError {
            error!(error = self.0.message(), "internal error surfaced to client");
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::from(&self.0))
    }
}

/// Fallback for routes outside the routing table.
pub async fn endpoint_not_found() -> HttpResponse {
    ApiError::from(DomainError::not_found("Endpoint not found")).error_response()
}

/// Render malformed request bodies with the standard envelope instead of
/// Actix's plain-text default.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::from(DomainError::invalid_request(err.to_string())).into()
}

/// JSON extractor configuration shared by `main` and the tests.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_code() {
        let cases = [
            (DomainError::invalid_request("bad"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("missing"), StatusCode::NOT_FOUND),
            (
                DomainError::internal("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (domain_err, expected) in cases {
            assert_eq!(ApiError::from(domain_err).status_code(), expected);
        }
    }

    #[test]
    fn envelope_carries_itemized_errors() {
        let err = DomainError::invalid_request("Validation failed")
            .with_errors(vec!["Age is required".into()]);
        let body = ErrorResponse::from(&err);
        assert!(!body.success);
        assert_eq!(body.message, "Validation failed");
        assert_eq!(body.errors.as_deref(), Some(&["Age is required".to_owned()][..]));
    }

    #[test]
    fn envelope_omits_errors_when_absent() {
        let body = serde_json::to_value(ErrorResponse::from(&DomainError::not_found(
            "User not found",
        )))
        .unwrap();
        assert!(body.get("errors").is_none());
        assert_eq!(body.get("code"), Some(&serde_json::json!("not_found")));
    }
}
