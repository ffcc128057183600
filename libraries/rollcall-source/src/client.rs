//! Client for randomuser-style generator APIs.

use crate::error::{Result, SourceError};
use crate::types::{RandomUserResponse, SourceConfig};
use async_trait::async_trait;
use reqwest::Client;
use rollcall_core::{NewUser, UserSource};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Fetches generated user records from the upstream API.
///
/// One call to [`RandomUserClient::fetch`] is one upstream request. No
/// retries are attempted.
#[derive(Debug, Clone)]
pub struct RandomUserClient {
    http: Client,
    base_url: Url,
}

impl RandomUserClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SourceConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(SourceError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url =
            Url::parse(&config.url).map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(SourceError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Rollcall/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(SourceError::Request)?;

        Ok(Self { http, base_url })
    }

    /// The endpoint this client calls.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for a request of `count` records.
    pub fn request_url(&self, count: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("results", &count.to_string());
        url
    }

    /// Fetch `count` generated users.
    pub async fn fetch(&self, count: u32) -> Result<Vec<NewUser>> {
        let url = self.request_url(count);
        debug!(url = %url, count, "Requesting users from upstream");

        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                SourceError::Unreachable(e.to_string())
            } else {
                SourceError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            let body: RandomUserResponse = response.json().await.map_err(|e| {
                SourceError::ParseError(format!("Failed to parse user payload: {}", e))
            })?;

            let users: Vec<NewUser> = body
                .results
                .into_iter()
                .take(count as usize)
                .map(NewUser::from)
                .collect();

            info!(requested = count, received = users.len(), "Fetched users from upstream");

            Ok(users)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(SourceError::Status {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl UserSource for RandomUserClient {
    async fn fetch_users(&self, count: u32) -> rollcall_core::Result<Vec<NewUser>> {
        Ok(self.fetch(count).await?)
    }
}
