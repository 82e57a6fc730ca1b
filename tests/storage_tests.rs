//! Storage backend tests
//!
//! Tests for SeaOrmStorage using temporary SQLite databases.

use chrono::{Duration, Utc};
use lovemeter::storage::SeaOrmStorage;
use lovemeter::storage::backend::{connect_sqlite, run_migrations};
use tempfile::TempDir;

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

// =============================================================================
// 连接测试
// =============================================================================

#[cfg(test)]
mod connection_tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_sqlite_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("new_db.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let conn = connect_sqlite(&db_url).await;
        assert!(conn.is_ok(), "Should connect to SQLite: {:?}", conn.err());
    }

    #[tokio::test]
    async fn test_connect_sqlite_memory() {
        let conn = connect_sqlite("sqlite::memory:").await;
        assert!(conn.is_ok(), "Should connect to in-memory SQLite");
    }

    #[tokio::test]
    async fn test_run_migrations() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("migration_test.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let conn = connect_sqlite(&db_url).await.unwrap();
        let result = run_migrations(&conn).await;
        assert!(result.is_ok(), "Migrations should run: {:?}", result.err());
    }

    #[tokio::test]
    async fn test_storage_new_empty_url_fails() {
        let result = SeaOrmStorage::new("", "sqlite").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_backend_name_reported() {
        let (storage, _temp) = create_temp_storage().await;
        assert_eq!(storage.backend_name(), "sqlite");
    }
}

// =============================================================================
// 写入原语测试
// =============================================================================

#[cfg(test)]
mod mutation_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_active_inserts_row_and_event() {
        let (storage, _temp) = create_temp_storage().await;
        let now = Utc::now();

        let created = storage
            .create_active(
                "7.7.7.7",
                Some("Mozilla/5.0".to_string()),
                Some("https://blog.example/post".to_string()),
                now,
            )
            .await
            .expect("create should succeed");
        assert!(created);

        let record = storage
            .find_love("7.7.7.7")
            .await
            .unwrap()
            .expect("record should exist");
        assert!(record.is_active);
        assert_eq!(record.client_hint.as_deref(), Some("Mozilla/5.0"));

        assert_eq!(storage.count_events().await.unwrap(), 1);
        let events = storage.recent_events(10).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].visitor_key, "7.7.7.7");
        assert_eq!(
            events[0].referrer.as_deref(),
            Some("https://blog.example/post")
        );
    }

    #[tokio::test]
    async fn test_create_active_duplicate_returns_false() {
        let (storage, _temp) = create_temp_storage().await;
        let now = Utc::now();

        assert!(storage.create_active("8.8.8.8", None, None, now).await.unwrap());
        let second = storage
            .create_active("8.8.8.8", None, None, now)
            .await
            .unwrap();
        assert!(!second, "Second create for the same key must be a no-op");

        // 事件也不能重复写入
        assert_eq!(storage.count_events().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_flip_active_flips_state() {
        let (storage, _temp) = create_temp_storage().await;
        let now = Utc::now();

        storage.create_active("1.1.1.1", None, None, now).await.unwrap();

        let rows = storage.flip_active("1.1.1.1", Utc::now()).await.unwrap();
        assert_eq!(rows, 1);
        let record = storage.find_love("1.1.1.1").await.unwrap().unwrap();
        assert!(!record.is_active);

        let rows = storage.flip_active("1.1.1.1", Utc::now()).await.unwrap();
        assert_eq!(rows, 1);
        let record = storage.find_love("1.1.1.1").await.unwrap().unwrap();
        assert!(record.is_active);
    }

    #[tokio::test]
    async fn test_flip_active_missing_row_affects_nothing() {
        let (storage, _temp) = create_temp_storage().await;

        let rows = storage.flip_active("ghost", Utc::now()).await.unwrap();
        assert_eq!(rows, 0);
        assert!(storage.find_love("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_flip_updates_last_changed_at() {
        let (storage, _temp) = create_temp_storage().await;
        let t0 = Utc::now();

        storage.create_active("2.2.2.2", None, None, t0).await.unwrap();
        storage
            .flip_active("2.2.2.2", t0 + Duration::seconds(5))
            .await
            .unwrap();

        let record = storage.find_love("2.2.2.2").await.unwrap().unwrap();
        assert!(record.last_changed_at > record.first_seen_at);
    }

    #[tokio::test]
    async fn test_flip_does_not_append_events() {
        let (storage, _temp) = create_temp_storage().await;
        let now = Utc::now();

        storage.create_active("3.3.3.3", None, None, now).await.unwrap();
        storage.flip_active("3.3.3.3", Utc::now()).await.unwrap();
        storage.flip_active("3.3.3.3", Utc::now()).await.unwrap();

        assert_eq!(storage.count_events().await.unwrap(), 1);
    }
}

// =============================================================================
// 查询测试
// =============================================================================

#[cfg(test)]
mod query_tests {
    use super::*;

    #[tokio::test]
    async fn test_find_love_missing_returns_none() {
        let (storage, _temp) = create_temp_storage().await;

        let result = storage.find_love("nobody").await.expect("query should succeed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_count_active_only_counts_active() {
        let (storage, _temp) = create_temp_storage().await;
        let now = Utc::now();

        storage.create_active("a.a.a.a", None, None, now).await.unwrap();
        storage.create_active("b.b.b.b", None, None, now).await.unwrap();
        storage.create_active("c.c.c.c", None, None, now).await.unwrap();
        storage.flip_active("b.b.b.b", Utc::now()).await.unwrap();

        assert_eq!(storage.count_active().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_recent_events_ordering_and_limit() {
        let (storage, _temp) = create_temp_storage().await;
        let base = Utc::now();

        storage
            .create_active("old", None, None, base - Duration::seconds(20))
            .await
            .unwrap();
        storage
            .create_active("middle", None, None, base - Duration::seconds(10))
            .await
            .unwrap();
        storage.create_active("new", None, None, base).await.unwrap();

        let events = storage.recent_events(2).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].visitor_key, "new");
        assert_eq!(events[1].visitor_key, "middle");
    }

    #[tokio::test]
    async fn test_stats_aggregates() {
        let (storage, _temp) = create_temp_storage().await;
        let now = Utc::now();

        storage.create_active("a.a.a.a", None, None, now).await.unwrap();
        storage.create_active("b.b.b.b", None, None, now).await.unwrap();
        storage.create_active("c.c.c.c", None, None, now).await.unwrap();
        storage.flip_active("c.c.c.c", Utc::now()).await.unwrap();

        let stats = storage.stats().await.unwrap();
        assert_eq!(stats.total_visitors, 3);
        assert_eq!(stats.active_loves, 2);
        assert_eq!(stats.total_events, 3);
    }

    #[tokio::test]
    async fn test_stats_empty_database() {
        let (storage, _temp) = create_temp_storage().await;

        let stats = storage.stats().await.unwrap();
        assert_eq!(stats.total_visitors, 0);
        assert_eq!(stats.active_loves, 0);
        assert_eq!(stats.total_events, 0);
    }
}
