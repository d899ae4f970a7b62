pub mod codes;
pub mod handlers;
pub mod messages;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use regex::Regex;
use sea_orm::{DbErr, SqlErr};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// `Detail: Key (lower(name))=(bolt) already exists.` style fragments in driver messages
static INTEGRITY_DETAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Detail:\s*([^.]+)").expect("valid regex"));

/// `... violates unique constraint "ux_inventory_items_name"` style fragments
static CONSTRAINT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"constraint "([^"]+)""#).expect("valid regex"));

/// Standard error response structure.
///
/// Returned for every failure:
/// - `code`: integer error code (e.g., 1003)
/// - `value`: symbolic error identifier (e.g., "RESOURCE_CONFLICT")
/// - `message`: human-readable message
/// - `timestamp`: when the error was produced (RFC 3339, UTC)
/// - `path`: request path that produced the error
/// - `details`: optional structured details (field validation errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1003,
///   "value": "RESOURCE_CONFLICT",
///   "message": "Inventory Item with name 'Bolt-M6' already exists",
///   "timestamp": "2025-01-01T12:00:00Z",
///   "path": "/api/v1/inventory-item"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub value: String,
    /// Human-readable error message
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Request path; filled in by the `error_path` middleware
    pub path: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            value: code.as_str().to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            path: String::new(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Option<serde_json::Value>) -> Self {
        self.details = details;
        self
    }

    /// Render with the given status.
    ///
    /// A copy of the payload rides along in the response extensions so the
    /// `error_path` middleware can stamp the request path onto it.
    pub fn into_http(self, status: StatusCode) -> Response {
        let mut response = (status, Json(self.clone())).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Path extraction error: {0}")]
    PathExtractorRejection(#[from] PathRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Method Not Allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code) = match self {
            AppError::Database(e) => map_db_error(&e),
            AppError::JsonExtractorRejection(e) => {
                tracing::info!(error_code = ErrorCode::InvalidData.code(), "JSON rejection: {:?}", e);
                (StatusCode::BAD_REQUEST, e.body_text(), None, ErrorCode::InvalidData)
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::info!(error_code = ErrorCode::InvalidData.code(), "Query rejection: {:?}", e);
                (StatusCode::BAD_REQUEST, e.body_text(), None, ErrorCode::InvalidData)
            }
            AppError::PathExtractorRejection(e) => {
                tracing::info!(error_code = ErrorCode::InvalidData.code(), "Path rejection: {:?}", e);
                (StatusCode::BAD_REQUEST, e.body_text(), None, ErrorCode::InvalidData)
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidData.code(),
                    "Validation error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    validation_summary(&e),
                    Some(validation_details(&e)),
                    ErrorCode::InvalidData,
                )
            }
            AppError::InvalidData(msg) => {
                tracing::info!(error_code = ErrorCode::InvalidData.code(), "Invalid data: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None, ErrorCode::InvalidData)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::ResourceNotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::ResourceNotFound)
            }
            AppError::Conflict(msg) => {
                tracing::info!(error_code = ErrorCode::ResourceConflict.code(), "Conflict: {}", msg);
                (StatusCode::CONFLICT, msg, None, ErrorCode::ResourceConflict)
            }
            AppError::MethodNotAllowed(msg) => {
                tracing::info!(error_code = ErrorCode::InvalidData.code(), "Method not allowed: {}", msg);
                (StatusCode::METHOD_NOT_ALLOWED, msg, None, ErrorCode::InvalidData)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                (StatusCode::SERVICE_UNAVAILABLE, msg, None, ErrorCode::ServiceUnavailable)
            }
            AppError::Unexpected(msg) => {
                // Internal detail goes to the log only
                tracing::error!(error_code = ErrorCode::UnexpectedError.code(), "Unexpected error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    messages::INTERNAL_ERROR.to_string(),
                    None,
                    ErrorCode::UnexpectedError,
                )
            }
        };

        ErrorResponse::new(code, message)
            .with_details(details)
            .into_http(status)
    }
}

/// Classifies a storage error that reached the HTTP boundary untranslated.
///
/// Integrity violations are a client-visible conflict, pool exhaustion is a
/// retryable outage, anything else is an internal failure.
fn map_db_error(error: &DbErr) -> (StatusCode, String, Option<serde_json::Value>, ErrorCode) {
    match error.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            tracing::warn!(
                error_code = ErrorCode::DatabaseError.code(),
                detail = %integrity_detail(&msg),
                "Database integrity violation: {}",
                msg
            );
            (
                StatusCode::CONFLICT,
                messages::INTEGRITY_VIOLATION.to_string(),
                None,
                ErrorCode::DatabaseError,
            )
        }
        _ => match error {
            DbErr::ConnectionAcquire(e) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Database connection unavailable: {:?}",
                    e
                );
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    messages::service_unavailable("Database"),
                    None,
                    ErrorCode::ServiceUnavailable,
                )
            }
            _ => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {:?}",
                    error
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DatabaseError.default_message().to_string(),
                    None,
                    ErrorCode::DatabaseError,
                )
            }
        },
    }
}

/// Pulls the key or constraint name out of a driver integrity message, for logs.
fn integrity_detail(message: &str) -> String {
    INTEGRITY_DETAIL
        .captures(message)
        .or_else(|| CONSTRAINT_NAME.captures(message))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| "<>".to_string())
}

/// One line per failing field, e.g. `Request validation failed: name (length)`.
fn validation_summary(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{} ({})", wire_field_name(field), reasons.join(", "))
        })
        .collect();
    fields.sort();

    if fields.is_empty() {
        messages::VALIDATION_FAILED.to_string()
    } else {
        format!("{}: {}", messages::VALIDATION_FAILED, fields.join("; "))
    }
}

/// Rust field name as it appears in camelCase JSON bodies: `standard_cost` -> `standardCost`.
fn wire_field_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = !name.is_empty();
        } else if upper_next {
            name.extend(c.to_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// Field errors as `{ field: [{code, message, params}] }`, keyed by the JSON field name.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let entries: Vec<serde_json::Value> = errs
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (wire_field_name(field), serde_json::Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 5))]
        name: String,
    }

    #[tokio::test]
    async fn test_conflict_maps_to_409() {
        let response = AppError::Conflict("taken".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_of(response).await;
        assert_eq!(body.code, 1003);
        assert_eq!(body.value, "RESOURCE_CONFLICT");
        assert_eq!(body.message, "taken");
    }

    #[tokio::test]
    async fn test_validation_error_carries_field_details() {
        let errors = Sample {
            name: "far too long".to_string(),
        }
        .validate()
        .unwrap_err();

        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(body.value, "INVALID_DATA");
        assert!(body.message.contains("name"));
        assert!(body.details.unwrap().get("name").is_some());
    }

    #[tokio::test]
    async fn test_unexpected_hides_internal_detail() {
        let response = AppError::Unexpected("SELECT * FROM secrets".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.code, 1001);
        assert!(!body.message.contains("SELECT"));
    }

    #[tokio::test]
    async fn test_service_unavailable_maps_to_503() {
        let response = AppError::ServiceUnavailable("uom down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_of(response).await.value, "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_untranslated_db_error_is_internal() {
        let response = AppError::Database(DbErr::Custom("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await.value, "DATABASE_ERROR");
    }

    #[test]
    fn test_response_extension_carries_payload() {
        let response = AppError::NotFound("gone".to_string()).into_response();
        let payload = response.extensions().get::<ErrorResponse>().unwrap();
        assert_eq!(payload.code, 1004);
        assert!(payload.path.is_empty());
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        assert_eq!(wire_field_name("name"), "name");
        assert_eq!(wire_field_name("base_unit_of_measure_id"), "baseUnitOfMeasureId");
        assert_eq!(wire_field_name("unit_per_purchase_uom"), "unitPerPurchaseUom");
        assert_eq!(wire_field_name("_private"), "private");
    }

    #[test]
    fn test_integrity_detail_extraction() {
        assert_eq!(
            integrity_detail("ERROR: duplicate key. Detail: Key (name)=(bolt) already exists."),
            "Key (name)=(bolt) already exists"
        );
        assert_eq!(
            integrity_detail(r#"duplicate key value violates unique constraint "ux_inventory_items_name""#),
            "ux_inventory_items_name"
        );
        assert_eq!(integrity_detail("something else"), "<>");
    }
}
