use crate::{create_pool, error::Result, users, StorageError};
use rollcall_core::{NewUser, User};
use sqlx::SqlitePool;

/// Pooled handle to the `users` table.
///
/// Cloning is cheap; every clone shares the same pool. Each call checks a
/// connection out for the duration of one statement and hands it back on
/// every exit path.
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        Ok(Self::new(create_pool(database_url, max_connections).await?))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        users::ensure_table(&self.pool).await
    }

    pub async fn insert(&self, user: &NewUser) -> Result<User> {
        users::insert(&self.pool, user).await
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    pub async fn count(&self) -> Result<i64> {
        users::count(&self.pool).await
    }

    /// Check that a connection can be acquired and used
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run a statement against a table that does not exist.
    ///
    /// Always yields an error; used to exercise failure reporting.
    pub async fn probe_failure(&self) -> StorageError {
        users::probe_missing_table(&self.pool).await
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
