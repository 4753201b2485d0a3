//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and connection
//! configuration for SQLite databases.

use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::domain::StoreKind;
use crate::error::StoreError;

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Lock and checkout limits for a pool whose callers give up after a fixed
/// store timeout.
///
/// A running blocking query is not cancelled when its caller stops waiting.
/// Both limits stay below the store timeout so a locked database or an
/// exhausted pool fails the query before the caller gives up on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolTimeouts {
    /// SQLite `busy_timeout`: how long a statement waits on a locked database.
    pub busy: Duration,
    /// How long a caller waits for a free pooled connection.
    pub checkout: Duration,
}

impl PoolTimeouts {
    /// Half of `store_timeout` for lock waits, a quarter for checkout.
    #[must_use]
    pub fn within(store_timeout: Duration) -> Self {
        Self {
            busy: (store_timeout / 2).max(MIN_TIMEOUT),
            checkout: (store_timeout / 4).max(MIN_TIMEOUT),
        }
    }

    fn busy_ms(&self) -> u32 {
        u32::try_from(self.busy.as_millis()).unwrap_or(u32::MAX)
    }
}

/// Applies connection pragmas whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn, self.busy_timeout_ms)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// An in-memory database exists per connection, so `:memory:` always gets a
/// single-connection pool regardless of `max_size`.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(
    database_url: &str,
    max_size: u32,
    timeouts: PoolTimeouts,
) -> Result<DbPool, StoreError> {
    let max_size = if database_url == ":memory:" { 1 } else { max_size };
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(timeouts.checkout)
        .connection_customizer(Box::new(SqlitePragmas {
            busy_timeout_ms: timeouts.busy_ms(),
        }))
        .build(manager)
        .map_err(|e| StoreError::unavailable(StoreKind::Relational, e))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::backend(StoreKind::Relational, e))?;
    Ok(())
}

/// Configure SQLite connection pragmas.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(
    conn: &mut SqliteConnection,
    busy_timeout_ms: u32,
) -> Result<(), diesel::result::Error> {
    diesel::sql_query(format!("PRAGMA busy_timeout={busy_timeout_ms}")).execute(conn)?;
    Ok(())
}
