use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use axum_helpers::errors::messages;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::INVENTORY_ITEM;

/// Label used in messages about the remote unit-of-measure resource
pub const UOM: &str = "Uom";

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("{0}")]
    InvalidData(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{}", messages::already_exists(INVENTORY_ITEM, .field, .value))]
    Conflict { field: &'static str, value: String },

    #[error("{}", messages::not_found(.entity, .field, .value))]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Internal error: {0}")]
    Unexpected(String),
}

impl InventoryError {
    /// No inventory item with this id
    pub fn not_found(id: i64) -> Self {
        Self::NotFound {
            entity: INVENTORY_ITEM,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Another inventory item already uses this name (case-insensitively)
    pub fn name_conflict(name: impl Into<String>) -> Self {
        Self::Conflict {
            field: "name",
            value: name.into(),
        }
    }

    /// The unit-of-measure service answered 404 for this id
    pub fn uom_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: UOM,
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn uom_unavailable() -> Self {
        Self::ServiceUnavailable(messages::service_unavailable("Unit of measure service"))
    }
}

/// Pool and connection failures are retryable outages; everything else is
/// carried as-is and classified at the HTTP boundary.
impl From<DbErr> for InventoryError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
                tracing::warn!(error = %err, "Database unavailable");
                Self::ServiceUnavailable(messages::service_unavailable("Database"))
            }
            other => Self::Database(other),
        }
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Convert InventoryError to AppError for standardized error responses
impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InvalidData(msg) => AppError::InvalidData(msg),
            InventoryError::Validation(errors) => AppError::ValidationError(errors),
            err @ InventoryError::Conflict { .. } => AppError::Conflict(err.to_string()),
            err @ InventoryError::NotFound { .. } => AppError::NotFound(err.to_string()),
            InventoryError::ServiceUnavailable(msg) => AppError::ServiceUnavailable(msg),
            InventoryError::Database(e) => AppError::Database(e),
            InventoryError::Unexpected(msg) => AppError::Unexpected(msg),
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
