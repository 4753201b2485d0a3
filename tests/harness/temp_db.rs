use std::path::{Path, PathBuf};
use std::time::Duration;

use clientdb::adapter::outbound::sqlite::SqliteClientStore;
use clientdb::port::outbound::store::RelationalClientStore;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tempfile::TempDir;

/// File-backed SQLite database that disappears with the test.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("clientdb-{name}.db"));
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    /// Open a migrated store over this database file.
    pub async fn store(&self, pool_size: u32) -> SqliteClientStore {
        self.store_with_timeout(pool_size, Duration::from_secs(5)).await
    }

    /// Open a migrated store whose lock waits fit inside `store_timeout`.
    pub async fn store_with_timeout(
        &self,
        pool_size: u32,
        store_timeout: Duration,
    ) -> SqliteClientStore {
        let store = SqliteClientStore::connect(&self.url(), pool_size, store_timeout)
            .expect("open sqlite pool");
        store.init().await.expect("run migrations");
        store
    }

    /// Hold an exclusive lock on the database file until the guard drops.
    pub fn lock_exclusive(&self) -> ExclusiveLock {
        let mut conn = SqliteConnection::establish(&self.url()).expect("open lock connection");
        diesel::sql_query("BEGIN EXCLUSIVE")
            .execute(&mut conn)
            .expect("take exclusive lock");
        ExclusiveLock { conn }
    }

    /// Number of rows in the `clients` table, read outside any pool.
    pub fn row_count(&self) -> i64 {
        let mut conn = SqliteConnection::establish(&self.url()).expect("open count connection");
        diesel::sql_query("SELECT COUNT(*) AS count FROM clients")
            .get_result::<RowCount>(&mut conn)
            .expect("count clients")
            .count
    }
}

/// An open `BEGIN EXCLUSIVE` transaction; rolled back on drop.
pub struct ExclusiveLock {
    conn: SqliteConnection,
}

impl ExclusiveLock {
    /// Commit the (empty) transaction, releasing the lock.
    pub fn release(mut self) {
        diesel::sql_query("COMMIT")
            .execute(&mut self.conn)
            .expect("release exclusive lock");
    }
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}
