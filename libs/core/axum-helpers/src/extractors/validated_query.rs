//! Query-string extractor with automatic validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Like [`ValidatedJson`](super::ValidatedJson) but for query parameters.
///
/// A missing required parameter is a deserialization failure and rejects
/// with 400 `INVALID_DATA`.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state).await?;
        data.validate()?;
        Ok(ValidatedQuery(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Paging {
        #[validate(range(min = 1, max = 100))]
        size: u64,
    }

    async fn size(ValidatedQuery(paging): ValidatedQuery<Paging>) -> String {
        paging.size.to_string()
    }

    async fn status_for(uri: &str) -> StatusCode {
        let app = Router::new().route("/", get(size));
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_query() {
        assert_eq!(status_for("/?size=20").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_out_of_range_query() {
        assert_eq!(status_for("/?size=0").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_query_parameter() {
        assert_eq!(status_for("/").await, StatusCode::BAD_REQUEST);
    }
}
