//! SQLite relational client store.
//!
//! Diesel is synchronous, so every query runs on the blocking thread pool
//! with its own pooled connection.

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool, PoolTimeouts,
};
use crate::adapter::outbound::sqlite::database::model::{ClientRow, NewClientRow};
use crate::adapter::outbound::sqlite::database::schema::clients;
use crate::domain::{NewRelationalClient, Page, RelationalClientRow, StoreKind};
use crate::error::StoreError;
use crate::port::outbound::store::RelationalClientStore;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    id: i64,
}

/// SQLite-backed relational client store.
///
/// Implements the [`RelationalClientStore`] trait over the `clients` table.
#[derive(Clone)]
pub struct SqliteClientStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteClientStore {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url` and wrap it. Lock waits and
    /// connection checkout are bounded by [`PoolTimeouts::within`]
    /// `store_timeout`.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the pool cannot be built.
    pub fn connect(
        database_url: &str,
        pool_size: u32,
        store_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = create_pool(database_url, pool_size, PoolTimeouts::within(store_timeout))?;
        Ok(Self::new(pool))
    }

    async fn with_conn<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| StoreError::unavailable(StoreKind::Relational, e))?;
            op(&mut conn)
        })
        .await
        .map_err(|e| StoreError::backend(StoreKind::Relational, e))?
    }
}

fn classify(err: DieselError) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreError::conflict(StoreKind::Relational, info.message())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            StoreError::unavailable(StoreKind::Relational, info.message())
        }
        other => StoreError::backend(StoreKind::Relational, other),
    }
}

fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl RelationalClientStore for SqliteClientStore {
    async fn insert(&self, row: NewRelationalClient) -> Result<RelationalClientRow, StoreError> {
        self.with_conn(move |conn| {
            let id = conn
                .transaction(|conn| {
                    diesel::insert_into(clients::table)
                        .values(NewClientRow::from(&row))
                        .execute(conn)?;

                    diesel::sql_query("SELECT last_insert_rowid() AS id")
                        .get_result::<LastInsertRowId>(conn)
                        .map(|inserted| inserted.id)
                })
                .map_err(classify)?;

            debug!(id, client_email = %row.client_email, "Inserted relational client");
            Ok(RelationalClientRow::from_new(id, row))
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<RelationalClientRow>, StoreError> {
        self.with_conn(move |conn| {
            let row: Option<ClientRow> = clients::table
                .find(id)
                .select(ClientRow::as_select())
                .first(conn)
                .optional()
                .map_err(classify)?;
            Ok(row.map(RelationalClientRow::from))
        })
        .await
    }

    async fn list(&self, page: Page) -> Result<Vec<RelationalClientRow>, StoreError> {
        self.with_conn(move |conn| {
            let rows: Vec<ClientRow> = clients::table
                .order(clients::id.asc())
                .offset(to_sql_bound(page.offset))
                .limit(to_sql_bound(page.limit))
                .select(ClientRow::as_select())
                .load(conn)
                .map_err(classify)?;
            Ok(rows.into_iter().map(RelationalClientRow::from).collect())
        })
        .await
    }

    async fn init(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| run_migrations(conn)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            diesel::sql_query("SELECT 1")
                .execute(conn)
                .map(|_| ())
                .map_err(|e| StoreError::unavailable(StoreKind::Relational, e))
        })
        .await
    }
}
