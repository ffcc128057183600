//! Rollcall User Source
//!
//! HTTP client for randomuser.me-compatible APIs: one `GET <base>?results=N`
//! call returns N generated people, which are mapped onto [`NewUser`].
//!
//! # Example
//!
//! ```ignore
//! use rollcall_source::{RandomUserClient, SourceConfig};
//!
//! let client = RandomUserClient::new(SourceConfig::new("https://randomuser.me/api/"))?;
//! let users = client.fetch(5).await?;
//! println!("Fetched {} users", users.len());
//! ```
//!
//! [`NewUser`]: rollcall_core::NewUser

mod client;
mod error;
mod types;

pub use client::RandomUserClient;
pub use error::{Result, SourceError};
pub use types::{
    RandomUser, RandomUserName, RandomUserPicture, RandomUserResponse, SourceConfig,
    DEFAULT_BASE_URL,
};
