//! Application state management.
//!
//! Shared state passed to the router builders and the readiness handler:
//! - Configuration
//! - PostgreSQL connection pool
//! - Unit-of-measure HTTP client

use domain_inventory::HttpUomClient;

/// Shared application state.
///
/// Cloning is cheap: the connection pool and the HTTP client are both
/// reference-counted handles.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Client for the unit-of-measure service (shares one connection pool)
    pub uom_client: HttpUomClient,
}
