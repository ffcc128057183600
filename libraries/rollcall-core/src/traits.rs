/// Core traits for Rollcall
use crate::error::Result;
use crate::types::NewUser;
use async_trait::async_trait;

/// A provider of freshly generated user records.
///
/// The production implementation is `rollcall_source::RandomUserClient`;
/// tests substitute in-memory or mocked sources.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch `count` user records in a single upstream call.
    ///
    /// Implementations may return fewer records than requested but never more.
    ///
    /// # Errors
    /// Returns an error if the upstream call fails or its payload cannot be read
    async fn fetch_users(&self, count: u32) -> Result<Vec<NewUser>>;
}
