//! Integration tests for the SQLite key-value store with real database operations

use peerhabit_core::*;
use peerhabit_storage_sql::SqliteStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

async fn memory_store() -> SqliteStore {
    let store = SqliteStore::new("sqlite::memory:").await.unwrap();
    store.initialize().await.unwrap();
    store
}

#[tokio::test]
async fn test_sqlite_scalar_upsert() {
    let store = memory_store().await;

    assert_eq!(store.get("robot-nick:robot:a").await.unwrap(), None);

    store.set("robot-nick:robot:a", "Fox").await.unwrap();
    store.set("robot-nick:robot:a", "Owl").await.unwrap();
    assert_eq!(
        store.get("robot-nick:robot:a").await.unwrap().as_deref(),
        Some("Owl")
    );
}

#[tokio::test]
async fn test_sqlite_sets() {
    let store = memory_store().await;

    assert!(store.set_members("robot-primary-keys").await.unwrap().is_empty());

    store.set_add("robot-primary-keys", "robot:a").await.unwrap();
    store.set_add("robot-primary-keys", "robot:a").await.unwrap();
    store.set_add("robot-primary-keys", "robot:b").await.unwrap();

    assert!(store.set_is_member("robot-primary-keys", "robot:a").await.unwrap());
    assert!(!store.set_is_member("robot-primary-keys", "robot:c").await.unwrap());
    assert!(!store
        .set_is_member("robot-registered-robots", "robot:a")
        .await
        .unwrap());

    let members = store.set_members("robot-primary-keys").await.unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.contains("robot:b"));
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let store = memory_store().await;
    store.set("k", "v").await.unwrap();
    store.initialize().await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn test_registry_over_sqlite() {
    let store = Arc::new(memory_store().await);
    let registry = RobotRegistry::new(store, Arc::new(StringCatalog::english().unwrap()));
    let mut rng = StdRng::seed_from_u64(21);

    let a = registry.create_robot(&mut rng).await.unwrap();
    let b = registry.create_robot(&mut rng).await.unwrap();
    assert_ne!(a, b);
    assert!(registry.is_known_key(&a).await.unwrap());

    let mut expected = vec![a.clone(), b.clone()];
    expected.sort();
    assert_eq!(registry.list_robots().await.unwrap(), expected);

    registry.set_nickname(&a, "Fox").await.unwrap();
    registry.set_response(&a, 7121, 7).await.unwrap();
    registry.set_combo(&a, 3).await.unwrap();

    let summary = registry.summarize(&a, 7121).await.unwrap();
    assert!(summary.contains("Fox responded with 7"));
    assert!(summary.contains("positive streak of 3"));

    assert_eq!(registry.zero_day(&b).await.unwrap(), DEFAULT_ZERO_DAY);
    assert!(registry.probability(&b).await.unwrap().is_some());
}

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("robots.db").display());

    let id = {
        let store = SqliteStore::new(&url).await.unwrap();
        store.initialize().await.unwrap();
        let registry = RobotRegistry::new(
            Arc::new(store),
            Arc::new(StringCatalog::korean().unwrap()),
        );
        let mut rng = StdRng::seed_from_u64(3);
        let id = registry.create_robot(&mut rng).await.unwrap();
        registry.set_score(&id, 7130, 61.5).await.unwrap();
        id
    };

    let store = SqliteStore::new(&url).await.unwrap();
    store.initialize().await.unwrap();
    let registry = RobotRegistry::new(Arc::new(store), Arc::new(StringCatalog::korean().unwrap()));

    assert!(registry.is_known_key(&id).await.unwrap());
    assert_eq!(registry.list_robots().await.unwrap(), vec![id.clone()]);
    assert!((registry.score(&id, 7130).await.unwrap() - 61.5).abs() < 1e-9);
}
