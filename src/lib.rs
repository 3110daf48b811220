/// Marketplace: a small listings API for regional produce markets
///
/// This library provides the core functionality of the marketplace server:
/// data models, database access, credential handling and the web API.
///
/// ### Modules
///
/// - `db`: Database connection management
/// - `models`: Data structures representing users and listings
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
/// - `security`: Password hashing and session tokens
///
/// ### Web API
///
/// The library exposes a RESTful API using Axum with the following endpoints:
///
/// - `GET /`: Liveness message
/// - `GET /api/auth`: List all users
/// - `POST /api/auth/register`: Register a user
/// - `POST /api/auth/login`: Exchange credentials for a token
/// - `GET /api/market`: List all listings (token required)
/// - `GET /api/market/{id}`: Get a listing (token required)
/// - `PUT /api/market/{id}`: Update a listing (token required)
/// - `GET /api/market/user/{id}`: A user's first listing (token required)
/// - `POST /api/market/user/{id}`: Create a listing for a user (token required)

/// Layered configuration (defaults, config file, CLI/env)
pub mod config;

/// Database connection module
pub mod db;

/// Request and response bodies
pub mod dto;

/// The API error type and its HTTP mapping
pub mod errors;

/// Custom request extractors
pub mod extract;

/// Web API handlers
pub mod handlers;

/// Token authorization for the market routes
pub mod middleware;

/// Data models module
pub mod models;

/// Repository module for database operations
pub mod repo;

/// Database schema module
pub mod schema;

/// Password hashing and session tokens
pub mod security;

/// Fixture data
pub mod seed;

/// Shared application state
pub mod state;

/// Tracing subscriber setup
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::*;
use crate::state::AppState;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates the application router with all routes
///
/// The market routes sit behind [`middleware::require_token`], applied as a
/// route layer so that unmatched paths still answer 404 rather than 400.
///
/// ### Arguments
///
/// * `state` - The pool, password hasher and token issuer shared by all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes and the state applied
pub fn create_app(state: AppState) -> Router {
    let market = Router::new()
        .route("/", get(list_listings_handler))
        .route("/{id}", get(get_listing_handler).put(update_listing_handler))
        .route(
            "/user/{id}",
            get(get_user_listing_handler).post(create_listing_handler),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_token));

    let auth = Router::new()
        .route("/", get(list_users_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler));

    Router::new()
        .route("/", get(root_handler))
        .nest("/api/auth", auth)
        .nest("/api/market", market)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the embedded migrations
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
///
/// ### Errors
///
/// Returns an error if a pending migration fails to apply
pub fn run_migrations(conn: &mut diesel::SqliteConnection) -> anyhow::Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    Ok(())
}
