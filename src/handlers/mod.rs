/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints.
/// Each handler validates its request, calls the repository layer and wraps
/// the outcome in an [`Envelope`](crate::dto::Envelope); failures are
/// returned as [`ApiError`](crate::errors::ApiError).

use axum::extract::Path;
use axum_extra::extract::WithRejection;

use crate::errors::ApiError;

mod system_handlers;
mod auth_handlers;
mod market_handlers;

// Re-export all handlers
pub use system_handlers::*;
pub use auth_handlers::*;
pub use market_handlers::*;

/// Integer path id whose rejection is reported in the API's own error body
pub type IdPath = WithRejection<Path<i32>, ApiError>;
