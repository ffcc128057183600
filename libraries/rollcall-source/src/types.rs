//! Wire types for the upstream user generator.

use rollcall_core::NewUser;
use serde::Deserialize;
use std::time::Duration;

/// Default upstream endpoint
pub const DEFAULT_BASE_URL: &str = "https://randomuser.me/api/";

/// Connection settings for the upstream user generator.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Endpoint that accepts `?results=N`
    pub url: String,
    /// Whole-request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,
}

impl SourceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Top-level response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomUserResponse {
    pub results: Vec<RandomUser>,
}

/// One generated person. Fields we do not store are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomUser {
    pub name: RandomUserName,
    pub email: String,
    #[serde(default)]
    pub picture: Option<RandomUserPicture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomUserName {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomUserPicture {
    pub large: Option<String>,
}

impl From<RandomUser> for NewUser {
    fn from(user: RandomUser) -> Self {
        NewUser {
            first_name: user.name.first,
            last_name: user.name.last,
            email: user.email,
            avatar: user.picture.and_then(|p| p.large),
        }
    }
}
