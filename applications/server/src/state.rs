/// Shared application state
use crate::{
    config::ServerConfig,
    error::{Result, ServerError},
    observe::Thresholds,
    services::{CountPolicy, Ingestor},
};
use rollcall_core::UserSource;
use rollcall_source::RandomUserClient;
use rollcall_storage::UserStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: UserStore,
    pub ingestor: Arc<Ingestor>,
    pub thresholds: Arc<Thresholds>,
}

impl AppState {
    pub fn new(store: UserStore, ingestor: Arc<Ingestor>, thresholds: Arc<Thresholds>) -> Self {
        Self {
            store,
            ingestor,
            thresholds,
        }
    }

    /// Open the database, ensure the `users` table and build the upstream client.
    ///
    /// Fails if the table cannot be ensured; callers treat that as fatal.
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        if let Some(parent) = config
            .database
            .file_path()
            .as_deref()
            .and_then(std::path::Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let store = UserStore::connect(&config.database.url, config.database.max_connections)
            .await?;
        store.ensure_schema().await?;
        tracing::info!("Users table ready");

        let client = RandomUserClient::new(config.source.client_config())
            .map_err(|e| ServerError::Config(e.to_string()))?;
        tracing::info!(url = %client.base_url(), "User source configured");

        Ok(Self::with_source(
            store,
            Arc::new(client),
            config.source.count_policy(),
            config.thresholds.clone(),
        ))
    }

    /// Assemble state around an already-open store and any user source
    pub fn with_source(
        store: UserStore,
        source: Arc<dyn UserSource>,
        policy: CountPolicy,
        thresholds: Thresholds,
    ) -> Self {
        let ingestor = Ingestor::new(store.clone(), source, policy, thresholds.clone());
        Self::new(store, Arc::new(ingestor), Arc::new(thresholds))
    }
}
