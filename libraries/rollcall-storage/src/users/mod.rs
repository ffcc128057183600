//! User record queries

use crate::{Result, StorageError};
use chrono::{DateTime, Utc};
use rollcall_core::{NewUser, User};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Fixed schema of the `users` table.
///
/// `created_at` keeps millisecond precision so that rows inserted within the
/// same second still sort in insertion order.
pub const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL,
        email VARCHAR(100) NOT NULL,
        avatar VARCHAR(255),
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )
";

/// Table queried by [`probe_missing_table`]; never created by this crate
pub const MISSING_TABLE: &str = "non_existent_table";

/// Create the `users` table if it is missing
///
/// Safe to run any number of times, including concurrently.
pub async fn ensure_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_TABLE).execute(pool).await?;
    Ok(())
}

/// Insert one record and return it with its assigned id and timestamp
pub async fn insert(pool: &SqlitePool, user: &NewUser) -> Result<User> {
    let row = sqlx::query(
        "INSERT INTO users (first_name, last_name, email, avatar)
         VALUES (?, ?, ?, ?)
         RETURNING id, first_name, last_name, email, avatar, created_at",
    )
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(user.avatar.as_deref())
    .fetch_one(pool)
    .await?;

    from_row(&row)
}

/// Get every stored user, newest first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(
        "SELECT id, first_name, last_name, email, avatar, created_at
         FROM users
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Count stored users
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS total FROM users")
        .fetch_one(pool)
        .await?;

    Ok(row.try_get::<i64, _>("total")?)
}

/// Select from [`MISSING_TABLE`] and hand back the resulting error
pub async fn probe_missing_table(pool: &SqlitePool) -> StorageError {
    let sql = format!("SELECT * FROM {}", MISSING_TABLE);
    match sqlx::query(&sql).fetch_all(pool).await {
        Err(e) => StorageError::Database(e),
        Ok(_) => StorageError::Query(format!("{} unexpectedly exists", MISSING_TABLE)),
    }
}

fn from_row(row: &SqliteRow) -> Result<User> {
    let created_at: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| StorageError::Decode(format!("created_at {:?}: {}", created_at, e)))?
        .with_timezone(&Utc);

    Ok(User {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        avatar: row.try_get("avatar")?,
        created_at,
    })
}
