use crate::db::DbPool;
use crate::models::{Listing, ListingChanges, NewListing, User};
use crate::schema::listings;
use diesel::prelude::*;
use anyhow::{Result, anyhow};



/// Creates a new listing in the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `new_listing` - The listing to insert, including its owning user ID
///
/// ### Returns
///
/// A Result containing the stored Listing with its store-assigned ID
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The owning user does not exist (FOREIGN KEY constraint)
pub fn create_listing(pool: &DbPool, new_listing: &NewListing) -> Result<Listing> {
    let conn = &mut pool.get()?;

    let listing = diesel::insert_into(listings::table)
        .values(new_listing)
        .returning(Listing::as_returning())
        .get_result(conn)?;

    Ok(listing)
}

/// Retrieves a listing by ID
///
/// ### Returns
///
/// `Ok(None)` if no listing has that ID
pub fn get_listing(pool: &DbPool, listing_id: i32) -> Result<Option<Listing>> {
    let conn = &mut pool.get()?;

    let listing = listings::table
        .find(listing_id)
        .select(Listing::as_select())
        .first(conn)
        .optional()?;

    Ok(listing)
}

/// Lists every listing ordered by ID
pub fn list_listings(pool: &DbPool) -> Result<Vec<Listing>> {
    let conn = &mut pool.get()?;

    let result = listings::table
        .order(listings::id.asc())
        .select(Listing::as_select())
        .load(conn)?;

    Ok(result)
}

/// Lists the listings owned by a user, ordered by ID
///
/// An empty vector does not imply the user is missing; callers that need to
/// tell the two apart check the user first.
pub fn list_listings_for_user(pool: &DbPool, user: &User) -> Result<Vec<Listing>> {
    let conn = &mut pool.get()?;

    let result = Listing::belonging_to(user)
        .order(listings::id.asc())
        .select(Listing::as_select())
        .load(conn)?;

    Ok(result)
}

/// Replaces the named fields of a listing
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `listing_id` - The listing to update
/// * `changes` - The fields to replace; `None` fields are left as they are
///
/// ### Returns
///
/// `Ok(None)` if no listing has that ID, otherwise the updated listing
///
/// ### Errors
///
/// Returns an error if `changes` names no field, or the update fails
pub fn update_listing(pool: &DbPool, listing_id: i32, changes: &ListingChanges) -> Result<Option<Listing>> {
    if changes.is_empty() {
        return Err(anyhow!("No fields to update for listing {}", listing_id));
    }

    let conn = &mut pool.get()?;

    let listing = diesel::update(listings::table.find(listing_id))
        .set(changes)
        .returning(Listing::as_returning())
        .get_result(conn)
        .optional()?;

    Ok(listing)
}
