use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use agencysite_core::{EntityKind, MappingError, ValidationError};
use agencysite_infra::StoreError;

/// Errors surfaced by request handlers.
///
/// Client faults (`Validation`, `NotFound`, `InvalidBody`, `InvalidQuery`) are
/// reported in detail. Server faults (`Mapping`, `Store`) are logged with full
/// detail and answered with a brief generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{} not found", .0.label())]
    NotFound(EntityKind),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("invalid query string: {0}")]
    InvalidQuery(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => {
                tracing::debug!(kind = %err.kind, "rejected payload: {err}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    axum::Json(json!({
                        "error": "validation_error",
                        "message": err.to_string(),
                        "fields": err.violations(),
                    })),
                )
                    .into_response()
            }
            ApiError::NotFound(kind) => {
                json_error(StatusCode::NOT_FOUND, "not_found", format!("{} not found", kind.label()))
            }
            ApiError::Mapping(err) => {
                tracing::error!(kind = %err.kind(), "stored document failed projection: {err}");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "mapping_error",
                    "stored content does not match its schema",
                )
            }
            ApiError::Store(err) => {
                tracing::error!("document store operation failed: {err}");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_error",
                    "content store is unavailable",
                )
            }
            ApiError::InvalidBody { status, message } => json_error(status, "invalid_body", message),
            ApiError::InvalidQuery(message) => {
                json_error(StatusCode::BAD_REQUEST, "invalid_query", message)
            }
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<axum::extract::rejection::QueryRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agencysite_core::FieldViolation;

    #[test]
    fn validation_maps_to_unprocessable_entity() {
        let err = ApiError::from(ValidationError::new(
            EntityKind::Lead,
            vec![FieldViolation::new("email", "field required")],
        ));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_names_the_kind() {
        let err = ApiError::NotFound(EntityKind::CaseStudy);
        assert_eq!(err.to_string(), "Case study not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn server_faults_map_to_internal_error() {
        let store = ApiError::from(StoreError::Unavailable("pool timed out".into()));
        assert_eq!(store.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let mapping = ApiError::from(MappingError::MissingField {
            kind: EntityKind::Post,
            field: "title",
        });
        assert_eq!(mapping.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_query_is_bad_request() {
        let err = ApiError::InvalidQuery("limit: invalid digit".into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
