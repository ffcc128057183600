//! Rollcall Core
//!
//! Shared domain types, the upstream source trait and error handling for Rollcall.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `NewUser`, `UserCount`
//! - **Core Traits**: `UserSource` (anything that can hand out fresh user records)
//! - **Error Handling**: Unified `RollcallError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use rollcall_core::NewUser;
//!
//! let user = NewUser::new("Ada", "Lovelace", "ada@example.com")
//!     .with_avatar("https://example.com/ada.jpg");
//! assert_eq!(user.avatar.as_deref(), Some("https://example.com/ada.jpg"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Result, RollcallError};
pub use traits::UserSource;
pub use types::{NewUser, User, UserCount};
