//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - CORS configuration
//! - Security headers
//! - Stamping the request path onto error payloads
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, error_path, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(error_path))
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer(origin));
//! ```

pub mod cors;
pub mod error_path;
pub mod security;

// Re-export commonly used functions
pub use cors::{create_cors_layer, create_permissive_cors_layer};
pub use error_path::error_path;
pub use security::security_headers;
