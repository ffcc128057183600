/// Common test utilities and fixtures
use async_trait::async_trait;
use rollcall_core::{NewUser, RollcallError, UserSource};
use rollcall_server::{create_router, AppState, CountPolicy, Thresholds};
use rollcall_storage::UserStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tempfile::TempDir;

/// A router over a real file-backed SQLite database
pub struct TestApp {
    pub router: axum::Router,
    pub store: UserStore,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn with_source(source: Arc<dyn UserSource>) -> Self {
        let (store, temp_dir) = create_test_store().await;
        let state = AppState::with_source(
            store.clone(),
            source,
            CountPolicy::default(),
            Thresholds::default(),
        );

        Self {
            router: create_router(state),
            store,
            _temp_dir: temp_dir,
        }
    }
}

/// Create a store in a temp directory with the users table in place
pub async fn create_test_store() -> (UserStore, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

    let store = UserStore::connect(&db_url, 5)
        .await
        .expect("Failed to open store");
    store.ensure_schema().await.expect("Failed to create table");

    (store, temp_dir)
}

/// Source that hands out a fixed list, truncated to the requested count,
/// and remembers the last count it was asked for
pub struct FixedSource {
    users: Vec<NewUser>,
    last_requested: AtomicU32,
}

impl FixedSource {
    pub fn new(users: Vec<NewUser>) -> Arc<Self> {
        Arc::new(Self {
            users,
            last_requested: AtomicU32::new(0),
        })
    }

    pub fn last_requested(&self) -> u32 {
        self.last_requested.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserSource for FixedSource {
    async fn fetch_users(&self, count: u32) -> rollcall_core::Result<Vec<NewUser>> {
        self.last_requested.store(count, Ordering::SeqCst);
        Ok(self.users.iter().take(count as usize).cloned().collect())
    }
}

/// Source that is always down
pub struct DownSource;

#[async_trait]
impl UserSource for DownSource {
    async fn fetch_users(&self, _count: u32) -> rollcall_core::Result<Vec<NewUser>> {
        Err(RollcallError::SourceUnreachable("connection refused".to_string()))
    }
}

pub mod fixtures {
    use rollcall_core::NewUser;

    /// The three records (A,B,a@x), (C,D,c@x), (E,F,e@x)
    pub fn three_users() -> Vec<NewUser> {
        vec![
            NewUser::new("A", "B", "a@x"),
            NewUser::new("C", "D", "c@x"),
            NewUser::new("E", "F", "e@x"),
        ]
    }
}
