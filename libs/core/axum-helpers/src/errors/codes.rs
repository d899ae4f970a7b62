//! Type-safe error codes for API responses.
//!
//! Each error code carries:
//! - a symbolic value for client consumption (e.g., "RESOURCE_NOT_FOUND")
//! - a stable integer code (e.g., 1004)
//! - a default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ResourceNotFound;
//! assert_eq!(code.as_str(), "RESOURCE_NOT_FOUND");
//! assert_eq!(code.code(), 1004);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Anything that could not be classified
    UnexpectedError,

    /// Structural or field validation failure, malformed body, path or query
    InvalidData,

    /// Request conflicts with current state (e.g., duplicate name)
    ResourceConflict,

    /// Requested resource, or a resource it references, does not exist
    ResourceNotFound,

    /// Storage failure that escaped classification closer to its origin
    DatabaseError,

    /// A downstream dependency is unreachable; the request may be retried
    ServiceUnavailable,
}

impl ErrorCode {
    /// Symbolic identifier clients can match on.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnexpectedError => "UNEXPECTED_ERROR",
            Self::InvalidData => "INVALID_DATA",
            Self::ResourceConflict => "RESOURCE_CONFLICT",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Integer code used in payloads and structured logs.
    pub fn code(&self) -> i32 {
        match self {
            Self::UnexpectedError => 1001,
            Self::InvalidData => 1002,
            Self::ResourceConflict => 1003,
            Self::ResourceNotFound => 1004,
            Self::DatabaseError => 1005,
            Self::ServiceUnavailable => 1006,
        }
    }

    /// Default user-facing message, used when no more specific one is available.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::UnexpectedError => "An unexpected error occurred",
            Self::InvalidData => "Request validation failed",
            Self::ResourceConflict => "Resource already exists",
            Self::ResourceNotFound => "Resource not found",
            Self::DatabaseError => "A database error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
