use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::errors::ApiError;
use crate::state::AppState;

/// The user a verified token was issued to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

/// Rejects market requests that carry no valid token
///
/// Runs as a route layer, before any extractor of the wrapped handlers, and
/// stores the resolved [`AuthUser`] in the request extensions.
pub async fn require_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers())?;

    let claims = state.tokens.verify(token).map_err(|e| {
        debug!("Rejected token: {}", e);
        ApiError::InvalidToken
    })?;
    let id = claims.user_id().ok_or(ApiError::InvalidToken)?;

    req.extensions_mut().insert(AuthUser {
        id,
        username: claims.username,
    });

    Ok(next.run(req).await)
}

/// Reads the token from the `Authorization` header
///
/// The token is accepted verbatim or with a `Bearer ` prefix.
fn extract_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(ApiError::MissingToken)?;

    let header = header.to_str().map_err(|_| ApiError::InvalidToken)?;

    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token.is_empty() {
        return Err(ApiError::MissingToken);
    }

    Ok(token)
}
