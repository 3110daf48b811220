use axum::{
    extract::rejection::PathRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json
};
use thiserror::Error;
use tracing::error;


#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
    #[error("{0}")]
    BadRequest(String),
    #[error("Please provide authentification information")]
    MissingToken,
    #[error("Invalid authentification information")]
    InvalidToken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User with specified ID not found")]
    UserNotFound,
    #[error("Listing with specified ID not found")]
    ListingNotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) | ApiError::MissingToken => StatusCode::BAD_REQUEST,
            ApiError::InvalidToken | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::UserNotFound | ApiError::ListingNotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Database(_) | ApiError::Internal(_) => {
                error!("{}", self);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(serde_json::json!({
            "message": message
        }));

        (status, body).into_response()
    }
}
