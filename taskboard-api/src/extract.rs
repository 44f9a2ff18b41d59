/// Request body extractor
///
/// Reads the whole body and decodes it as JSON whatever `Content-Type` the
/// client sent; browsers posting `text/plain` to skip a preflight are
/// accepted. A body that cannot be read or decoded becomes
/// `ApiError::NotAcceptable`. Extraction runs before the handler body, so a
/// request that fails here never reaches the database.

use crate::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON body that rejects with 406
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(request, state).await?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        id: i32,
    }

    async fn extract(request: Request) -> Result<Params, ApiError> {
        JsonBody::<Params>::from_request(request, &())
            .await
            .map(|JsonBody(params)| params)
    }

    fn request_with(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method("POST");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let params = extract(request_with(Some("application/json"), r#"{"id": 5}"#))
            .await
            .unwrap();
        assert_eq!(params.id, 5);
    }

    #[tokio::test]
    async fn test_syntax_error_is_406() {
        let err = extract(request_with(Some("application/json"), r#"{"id": "#))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn test_wrong_type_is_406() {
        let err = extract(request_with(Some("application/json"), r#"{"id": "five"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn test_empty_body_is_406() {
        let err = extract(request_with(None, "")).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn test_text_plain_body_is_accepted() {
        let params = extract(request_with(
            Some("text/plain;charset=UTF-8"),
            r#"{"id": 9}"#,
        ))
        .await
        .unwrap();
        assert_eq!(params.id, 9);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_accepted() {
        let params = extract(request_with(None, r#"{"id": 3}"#)).await.unwrap();
        assert_eq!(params.id, 3);
    }
}
