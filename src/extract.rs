use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::ApiError;

/// JSON request body that may legitimately be absent
///
/// axum's `Json` extractor rejects a missing body or content type with its own
/// status and text. The API instead has to answer those requests with its own
/// envelope, so an empty (or whitespace-only) body becomes `Payload(None)` and
/// malformed JSON becomes an `ApiError::BadRequest`.
#[derive(Debug)]
pub struct Payload<T>(pub Option<T>);

impl<T> Payload<T>
where
    T: Default,
{
    /// The body, or `T::default()` when none was sent
    pub fn into_inner_or_default(self) -> T {
        self.0.unwrap_or_default()
    }
}

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload(None));
        }

        serde_json::from_slice(&bytes)
            .map(|value| Payload(Some(value)))
            .map_err(|e| {
                debug!("Rejected request body: {}", e);
                ApiError::BadRequest(format!("Invalid request body: {}", e))
            })
    }
}
