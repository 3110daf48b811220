use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;
use r2d2::Pool;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Applies the per-connection SQLite settings every pooled connection needs
///
/// SQLite only enforces `REFERENCES` clauses when `foreign_keys` is switched on,
/// and the setting does not persist across connections.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the connection pool for the given database URL
///
/// ### Arguments
///
/// * `database_url` - A SQLite path or `file:` URI
///
/// ### Returns
///
/// The pool, or the error raised while opening its first connections
pub fn init_pool(database_url: &str) -> Result<DbPool, r2d2::Error> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
}
