use garimpo_core::models::{DEFAULT_CONFIG_ID, SourceTag};
use garimpo_db::{ConfigRepository, UpdateSearchConfig};

use crate::integration::common::setup_test_db;

#[tokio::test]
async fn get_or_create_is_idempotent() {
    let (pool, _container) = setup_test_db().await;
    let repo = ConfigRepository::new(pool);

    let first = repo.get_or_create().await.unwrap();
    assert_eq!(first.id, DEFAULT_CONFIG_ID);
    assert_eq!(first.keywords, "");
    assert_eq!(first.interval_hours, 6);
    assert!(first.is_active);
    assert!(first.last_search_at.is_none());

    let second = repo.get_or_create().await.unwrap();
    assert_eq!(second, first);
}

#[tokio::test]
async fn update_roundtrips_and_parses_enabled_tags() {
    let (pool, _container) = setup_test_db().await;
    let repo = ConfigRepository::new(pool);

    let updated = repo
        .update(&UpdateSearchConfig {
            keywords: "desenvolvedor rust".to_string(),
            location: "Recife".to_string(),
            interval_hours: 12,
            enabled_sources: "remotive,linkedin,typo".to_string(),
            is_active: false,
        })
        .await
        .unwrap();

    assert_eq!(updated.keywords, "desenvolvedor rust");
    assert_eq!(updated.interval_hours, 12);
    assert!(!updated.is_active);
    assert_eq!(
        updated.enabled_tags(),
        vec![SourceTag::Remotive, SourceTag::LinkedIn]
    );

    let fetched = repo.get_or_create().await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn touch_last_search_stamps_the_row() {
    let (pool, _container) = setup_test_db().await;
    let repo = ConfigRepository::new(pool);

    let before = repo.get_or_create().await.unwrap();
    assert!(before.last_search_at.is_none());

    repo.touch_last_search().await.unwrap();

    let after = repo.get_or_create().await.unwrap();
    assert!(after.last_search_at.is_some());
}

#[tokio::test]
async fn update_does_not_reset_last_search_at() {
    let (pool, _container) = setup_test_db().await;
    let repo = ConfigRepository::new(pool);

    repo.get_or_create().await.unwrap();
    repo.touch_last_search().await.unwrap();

    let updated = repo
        .update(&UpdateSearchConfig {
            keywords: "qa".to_string(),
            location: String::new(),
            interval_hours: 3,
            enabled_sources: String::new(),
            is_active: true,
        })
        .await
        .unwrap();

    assert!(updated.last_search_at.is_some());
}
