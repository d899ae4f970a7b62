use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
};

use super::{AppError, messages};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");
    AppError::NotFound(messages::ROUTE_NOT_FOUND.to_string()).into_response()
}

/// Handler for 405 Method Not Allowed errors.
///
/// Use with `Router::method_not_allowed_fallback` so wrong-verb requests on
/// known paths get the standard error payload.
pub async fn method_not_allowed(method: Method) -> Response {
    AppError::MethodNotAllowed(messages::method_not_supported(&method)).into_response()
}
