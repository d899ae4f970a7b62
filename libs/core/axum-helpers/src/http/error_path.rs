use crate::errors::ErrorResponse;
use axum::{
    body::Body,
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};

/// Fills `ErrorResponse::path` with the path of the request that failed.
///
/// Error payloads are produced deep inside handlers and extractors that never
/// see the URI. They leave a copy of themselves in the response extensions;
/// this middleware picks it up and re-serializes the body with the path set.
/// Responses without that extension pass through untouched.
pub async fn error_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;

    let Some(mut payload) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };
    payload.path = path;

    match serde_json::to_vec(&payload) {
        Ok(bytes) => {
            response.headers_mut().remove(header::CONTENT_LENGTH);
            *response.body_mut() = Body::from(bytes);
        }
        Err(e) => tracing::warn!("Failed to re-encode error payload: {}", e),
    }

    response
}
