//! Rollcall Storage
//!
//! `SQLite` persistence for ingested user records.
//!
//! The crate owns a single `users` table. The schema is fixed and created with
//! `CREATE TABLE IF NOT EXISTS`; there are no migrations.
//!
//! # Example
//!
//! ```rust,no_run
//! use rollcall_core::NewUser;
//! use rollcall_storage::UserStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = UserStore::connect("sqlite://rollcall.db", 5).await?;
//! store.ensure_schema().await?;
//!
//! store.insert(&NewUser::new("Ada", "Lovelace", "ada@example.com")).await?;
//! let newest_first = store.list().await?;
//! let total = store.count().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

// Vertical slices
pub mod users;

pub use error::{Result, StorageError};
pub use store::UserStore;

use sqlx::sqlite::SqlitePool;

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://rollcall.db>`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `StorageError::Connection` if the database cannot be opened
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}
