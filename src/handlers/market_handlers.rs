use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::{Envelope, ListingDto};
use crate::errors::ApiError;
use crate::extract::Payload;
use crate::handlers::IdPath;
use crate::middleware::AuthUser;
use crate::models::Listing;
use crate::repo;

/// Handler for listing every listing
///
/// This function handles GET requests to `/api/market`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `auth` - The caller resolved by the token middleware
///
/// ### Returns
///
/// All listings ordered by ID
#[instrument(skip(pool, auth), fields(caller = auth.id))]
pub async fn list_listings_handler(
    State(pool): State<Arc<DbPool>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Envelope<Vec<Listing>>>, ApiError> {
    debug!("Listing all listings");

    let listings = repo::list_listings(&pool).map_err(ApiError::Database)?;

    info!("Retrieved {} listings", listings.len());
    Ok(Json(Envelope::data(listings)))
}

/// Handler for retrieving a specific listing
///
/// This function handles GET requests to `/api/market/{id}`.
///
/// ### Returns
///
/// The listing, or `ListingNotFound`
#[instrument(skip(pool, auth), fields(caller = auth.id, listing_id = listing_id))]
pub async fn get_listing_handler(
    State(pool): State<Arc<DbPool>>,
    Extension(auth): Extension<AuthUser>,
    WithRejection(Path(listing_id), _): IdPath,
) -> Result<Json<Envelope<Listing>>, ApiError> {
    debug!("Retrieving listing");

    let listing = repo::get_listing(&pool, listing_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::ListingNotFound)?;

    Ok(Json(Envelope::data(listing)))
}

/// Handler for retrieving the listing owned by one user
///
/// This function handles GET requests to `/api/market/user/{id}`. Clients
/// read `data.user_id` off a single listing, so the response carries the
/// user's lowest-ID listing rather than an array.
///
/// ### Returns
///
/// The user's first listing
///
/// ### Errors
///
/// - `UserNotFound` when no such user exists
/// - `ListingNotFound` when the user owns no listing
#[instrument(skip(pool, auth), fields(caller = auth.id, user_id = user_id))]
pub async fn get_user_listing_handler(
    State(pool): State<Arc<DbPool>>,
    Extension(auth): Extension<AuthUser>,
    WithRejection(Path(user_id), _): IdPath,
) -> Result<Json<Envelope<Listing>>, ApiError> {
    debug!("Retrieving listing for user");

    let user = repo::get_user(&pool, user_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::UserNotFound)?;

    let listings = repo::list_listings_for_user(&pool, &user).map_err(ApiError::Database)?;
    debug!("User {} owns {} listings", user_id, listings.len());

    let listing = listings.into_iter().next().ok_or(ApiError::ListingNotFound)?;

    Ok(Json(Envelope::data(listing)))
}

/// Handler for creating a listing owned by a user
///
/// This function handles POST requests to `/api/market/user/{id}`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `auth` - The caller resolved by the token middleware
/// * `user_id` - The owner of the new listing, from the URL path
/// * `payload` - The seven product fields
///
/// ### Returns
///
/// `201 Created` with the stored listing, including its `id` and `user_id`
///
/// ### Errors
///
/// - `UserNotFound` when the owner does not exist
/// - `BadRequest` for an empty payload or missing fields
#[instrument(skip(pool, auth, payload), fields(caller = auth.id, user_id = user_id))]
pub async fn create_listing_handler(
    State(pool): State<Arc<DbPool>>,
    Extension(auth): Extension<AuthUser>,
    WithRejection(Path(user_id), _): IdPath,
    payload: Payload<ListingDto>,
) -> Result<(StatusCode, Json<Envelope<Listing>>), ApiError> {
    info!("Creating listing");

    if !repo::user_exists(&pool, user_id).map_err(ApiError::Database)? {
        return Err(ApiError::UserNotFound);
    }

    let new_listing = payload.into_inner_or_default().into_new_listing(user_id)?;

    let listing = repo::create_listing(&pool, &new_listing).map_err(ApiError::Database)?;

    info!("Successfully created listing with id: {}", listing.id);
    Ok((StatusCode::CREATED, Json(Envelope::data(listing))))
}

/// Handler for updating a listing
///
/// This function handles PUT requests to `/api/market/{id}`. Only the fields
/// present in the payload are replaced; `id` and `user_id` never change.
///
/// ### Errors
///
/// - `BadRequest` for an empty payload
/// - `ListingNotFound` when no such listing exists
#[instrument(skip(pool, auth, payload), fields(caller = auth.id, listing_id = listing_id))]
pub async fn update_listing_handler(
    State(pool): State<Arc<DbPool>>,
    Extension(auth): Extension<AuthUser>,
    WithRejection(Path(listing_id), _): IdPath,
    payload: Payload<ListingDto>,
) -> Result<Json<Envelope<Listing>>, ApiError> {
    info!("Updating listing");

    let changes = payload.into_inner_or_default().into_changes()?;

    let listing = repo::update_listing(&pool, listing_id, &changes)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::ListingNotFound)?;

    info!("Successfully updated listing with id: {}", listing.id);
    Ok(Json(Envelope::data(listing)))
}
