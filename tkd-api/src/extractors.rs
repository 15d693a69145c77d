//! Request extractors

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Lenient JSON body extractor.
///
/// An empty body counts as `{}` and the content type is ignored; only an
/// unparsable body is rejected, as 400 `{"error":"invalid_json"}`, before any
/// state is touched.
#[derive(Debug, Clone)]
pub struct RawJson(pub Value);

#[async_trait]
impl<S> FromRequest<S> for RawJson
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::invalid_json())?;
        if bytes.is_empty() {
            return Ok(RawJson(Value::Object(Map::new())));
        }
        serde_json::from_slice(&bytes)
            .map(RawJson)
            .map_err(|_| ApiError::invalid_json())
    }
}
