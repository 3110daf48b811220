/// Repository module
///
/// This module provides the data access layer for the application.
/// Every function takes the connection pool explicitly, returns
/// `anyhow::Result`, and reports a missing row as `Ok(None)` rather than
/// an error, leaving the HTTP meaning of "not found" to the handlers.

mod user_repo;
mod listing_repo;

// Re-export all repository functions
pub use user_repo::*;
pub use listing_repo::*;

#[cfg(test)]
pub mod tests {
    use std::sync::Arc;

    use crate::db::{self, DbPool};

    /// Sets up a test database with migrations applied
    ///
    /// This function:
    /// 1. Creates a uniquely named shared in-memory SQLite database
    /// 2. Runs all migrations to set up the schema
    ///
    /// Foreign keys are switched on by the pool's connection customizer.
    ///
    /// ### Returns
    ///
    /// A database connection pool connected to the in-memory database
    pub fn setup_test_db() -> Arc<DbPool> {
        // Plain ":memory:" gives each pooled connection its own database, so
        // migrations would only be visible on one of them.
        let unique_id = uuid::Uuid::new_v4();
        let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
        let pool = db::init_pool(&database_url).expect("Failed to create pool");

        let mut conn = pool.get().expect("Failed to get connection");
        crate::run_migrations(&mut conn).expect("Failed to run migrations");

        Arc::new(pool)
    }
}
