//! Connection cleanup during graceful shutdown.

use tracing::{error, info};

/// Close a SeaORM connection pool and log the outcome.
///
/// `DatabaseConnection` also closes on drop; closing explicitly lets the
/// shutdown path report failures.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::close_postgres;
///
/// close_postgres(db, "main").await;
/// ```
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!("PostgreSQL connection '{}' closed successfully", name),
        Err(e) => error!("Error closing PostgreSQL connection '{}': {}", name, e),
    }
}
