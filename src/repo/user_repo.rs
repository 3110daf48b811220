use crate::db::DbPool;
use crate::models::{NewUser, User};
use crate::schema::users;
use diesel::prelude::*;
use anyhow::Result;


/// Creates a new user in the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `username` - The unique login name
/// * `password_hash` - The already hashed password
///
/// ### Returns
///
/// A Result containing the newly created User with its store-assigned ID
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The username is already taken (UNIQUE constraint)
pub fn create_user(pool: &DbPool, username: String, password_hash: String) -> Result<User> {
    let conn = &mut pool.get()?;

    let user = diesel::insert_into(users::table)
        .values(&NewUser::new(username, password_hash))
        .returning(User::as_returning())
        .get_result(conn)?;

    Ok(user)
}

/// Retrieves a user by ID
///
/// ### Returns
///
/// `Ok(None)` if no user has that ID
pub fn get_user(pool: &DbPool, user_id: i32) -> Result<Option<User>> {
    let conn = &mut pool.get()?;

    let user = users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()?;

    Ok(user)
}

/// Retrieves a user by username
///
/// ### Returns
///
/// `Ok(None)` if no user has that username
pub fn get_user_by_username(pool: &DbPool, username: &str) -> Result<Option<User>> {
    let conn = &mut pool.get()?;

    let user = users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first(conn)
        .optional()?;

    Ok(user)
}

/// Lists all users ordered by ID
pub fn list_users(pool: &DbPool) -> Result<Vec<User>> {
    let conn = &mut pool.get()?;

    let result = users::table
        .order(users::id.asc())
        .select(User::as_select())
        .load(conn)?;

    Ok(result)
}

/// Returns whether a user with the given ID exists
pub fn user_exists(pool: &DbPool, user_id: i32) -> Result<bool> {
    let conn = &mut pool.get()?;

    let exists: bool = diesel::select(diesel::dsl::exists(users::table.find(user_id)))
        .get_result(conn)?;

    Ok(exists)
}
