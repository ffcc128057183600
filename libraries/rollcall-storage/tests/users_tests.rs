//! Integration tests for the users table
//!
//! These tests use REAL SQLite files (NOT in-memory) so the pool behaves the
//! way it does in production.

use rollcall_core::NewUser;
use rollcall_storage::{StorageError, UserStore};
use tempfile::TempDir;

/// Test store wrapper that keeps its temp directory alive
struct TestStore {
    store: UserStore,
    _temp_dir: TempDir,
}

impl TestStore {
    async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let store = UserStore::connect(&db_url, 5)
            .await
            .expect("Failed to open store");
        store.ensure_schema().await.expect("Failed to create table");

        Self {
            store,
            _temp_dir: temp_dir,
        }
    }
}

fn fixture(first: &str, last: &str, email: &str) -> NewUser {
    NewUser::new(first, last, email)
}

#[tokio::test]
async fn test_ensure_schema_is_idempotent() {
    let test = TestStore::new().await;

    test.store.ensure_schema().await.unwrap();
    test.store.ensure_schema().await.unwrap();

    assert_eq!(test.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_ensure_schema_keeps_existing_rows() {
    let test = TestStore::new().await;
    test.store
        .insert(&fixture("Ada", "Lovelace", "ada@example.com"))
        .await
        .unwrap();

    test.store.ensure_schema().await.unwrap();

    assert_eq!(test.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_concurrent_ensure_schema() {
    let test = TestStore::new().await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = test.store.clone();
            tokio::spawn(async move { store.ensure_schema().await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_insert_assigns_id_and_timestamp() {
    let test = TestStore::new().await;

    let first = test
        .store
        .insert(&fixture("Ada", "Lovelace", "ada@example.com").with_avatar("https://x/a.jpg"))
        .await
        .unwrap();
    let second = test
        .store
        .insert(&fixture("Alan", "Turing", "alan@example.com"))
        .await
        .unwrap();

    assert!(second.id > first.id);
    assert!(second.created_at >= first.created_at);
    assert_eq!(first.first_name, "Ada");
    assert_eq!(first.avatar.as_deref(), Some("https://x/a.jpg"));
    assert!(second.avatar.is_none());
}

#[tokio::test]
async fn test_duplicate_emails_are_allowed() {
    let test = TestStore::new().await;
    let user = fixture("Ada", "Lovelace", "same@example.com");

    test.store.insert(&user).await.unwrap();
    test.store.insert(&user).await.unwrap();

    assert_eq!(test.store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let test = TestStore::new().await;

    for (first, last, email) in [("A", "B", "a@x"), ("C", "D", "c@x"), ("E", "F", "e@x")] {
        test.store
            .insert(&fixture(first, last, email))
            .await
            .unwrap();
    }

    let users = test.store.list().await.unwrap();
    let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["e@x", "c@x", "a@x"]);
}

#[tokio::test]
async fn test_list_empty_table() {
    let test = TestStore::new().await;
    assert!(test.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_count_tracks_inserts() {
    let test = TestStore::new().await;
    let before = test.store.count().await.unwrap();

    for i in 0..4 {
        test.store
            .insert(&fixture("User", &i.to_string(), "u@example.com"))
            .await
            .unwrap();
    }

    assert_eq!(test.store.count().await.unwrap(), before + 4);
}

#[tokio::test]
async fn test_probe_failure_always_errors() {
    let test = TestStore::new().await;

    let err = test.store.probe_failure().await;
    assert!(matches!(err, StorageError::Database(_)));
    assert!(err.to_string().contains("non_existent_table"));
}

#[tokio::test]
async fn test_count_without_table_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("bare.db").display());
    let store = UserStore::connect(&db_url, 1).await.unwrap();

    assert!(store.count().await.is_err());
}

#[tokio::test]
async fn test_connect_to_unreachable_path_fails() {
    let result = UserStore::connect("sqlite:///nonexistent-dir/deeper/x.db", 1).await;
    assert!(matches!(result, Err(StorageError::Connection(_))));
}

#[tokio::test]
async fn test_ping_after_close_fails() {
    let test = TestStore::new().await;
    test.store.ping().await.unwrap();

    test.store.close().await;
    assert!(test.store.ping().await.is_err());
}
