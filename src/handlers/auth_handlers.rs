use axum::{extract::State, http::StatusCode, Json};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::db::DbPool;
use crate::dto::{Envelope, LoginDto, LoginResponse, RegisterDto};
use crate::errors::ApiError;
use crate::extract::Payload;
use crate::models::User;
use crate::repo;
use crate::security::PasswordHasher;
use crate::state::AppState;

/// Message for a registration that reuses a taken username
pub const USERNAME_TAKEN: &str = "Username already exists";

/// Greeting returned alongside a fresh token
pub const WELCOME_MESSAGE: &str = "Welcome to api";

/// Handler for listing all users
///
/// This function handles GET requests to `/api/auth`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
///
/// ### Returns
///
/// Every user ordered by ID; password hashes are never serialized
#[instrument(skip(pool))]
pub async fn list_users_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Envelope<Vec<User>>>, ApiError> {
    debug!("Listing all users");

    let users = repo::list_users(&pool).map_err(ApiError::Database)?;

    info!("Retrieved {} users", users.len());
    Ok(Json(Envelope::data(users)))
}

/// Handler for registering a user
///
/// This function handles POST requests to `/api/auth/register`.
///
/// ### Arguments
///
/// * `state` - The application state (pool and password hasher)
/// * `payload` - The optional JSON body with `username` and `password`
///
/// ### Returns
///
/// `201 Created` with the new user's `id` and `username`
///
/// ### Errors
///
/// - `BadRequest` when the body or one of the credentials is missing
/// - `Conflict` when the username is already registered
#[instrument(skip(state, payload))]
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Payload<RegisterDto>,
) -> Result<(StatusCode, Json<Envelope<User>>), ApiError> {
    let credentials = payload.into_inner_or_default().validate()?;
    info!(username = %credentials.username, "Registering user");

    let taken = repo::get_user_by_username(&state.pool, &credentials.username)
        .map_err(ApiError::Database)?
        .is_some();
    if taken {
        warn!(username = %credentials.username, "Username already registered");
        return Err(ApiError::Conflict(USERNAME_TAKEN.to_string()));
    }

    let password_hash = hash_password(state.hasher.clone(), credentials.password).await?;

    // A concurrent registration can still win the race to the UNIQUE index.
    let user = repo::create_user(&state.pool, credentials.username, password_hash)
        .map_err(conflict_or_database)?;

    info!("Registered user with id: {}", user.get_id());
    Ok((StatusCode::CREATED, Json(Envelope::data(user))))
}

/// Handler for logging in
///
/// This function handles POST requests to `/api/auth/login`.
///
/// ### Returns
///
/// A signed token for the user, to be sent back in the `Authorization` header
///
/// ### Errors
///
/// - `BadRequest` when the body or one of the credentials is missing
/// - `InvalidCredentials` for an unknown username or a wrong password
#[instrument(skip(state, payload))]
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Payload<LoginDto>,
) -> Result<Json<LoginResponse>, ApiError> {
    let credentials = payload.into_inner_or_default().validate()?;
    debug!(username = %credentials.username, "Login attempt");

    let user = repo::get_user_by_username(&state.pool, &credentials.username)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::InvalidCredentials)?;

    let password_hash = user.get_password_hash().to_string();
    if !verify_password(state.hasher.clone(), credentials.password, password_hash).await? {
        debug!("Password mismatch for user {}", user.get_id());
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .tokens
        .issue(&user)
        .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))?;

    info!("User {} logged in", user.get_id());
    Ok(Json(LoginResponse {
        message: WELCOME_MESSAGE.to_string(),
        token,
    }))
}

/// Hashes a password on the blocking thread pool
async fn hash_password(hasher: Arc<PasswordHasher>, password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| ApiError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))
}

async fn verify_password(
    hasher: Arc<PasswordHasher>,
    password: String,
    password_hash: String,
) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
        .await
        .map_err(|e| ApiError::Internal(format!("Password verification task failed: {}", e)))
}

fn conflict_or_database(err: anyhow::Error) -> ApiError {
    match err.downcast_ref::<DieselError>() {
        Some(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            ApiError::Conflict(USERNAME_TAKEN.to_string())
        }
        _ => ApiError::Database(err),
    }
}
