use garimpo_core::models::{JobCandidate, SourceTag};
use garimpo_db::{JobFilter, JobRepository};

use crate::integration::common::setup_test_db;

fn candidate(url: &str, title: &str, source: SourceTag) -> JobCandidate {
    JobCandidate {
        title: title.to_string(),
        company: "Acme".to_string(),
        location: "Recife, PE".to_string(),
        description: "Backend em Rust".to_string(),
        url: url.to_string(),
        source,
        salary: Some("BRL 9.000+".to_string()),
        tags: Some("rust, backend".to_string()),
        posted_at: None,
        external_id: Some("ext-1".to_string()),
    }
}

#[tokio::test]
async fn upsert_creates_then_refreshes_without_duplicating() {
    let (pool, _container) = setup_test_db().await;
    let repo = JobRepository::new(pool);

    let url = "https://jobs.example/1";
    let first = repo
        .upsert(&candidate(url, "Original title", SourceTag::Remotive))
        .await
        .unwrap();
    assert!(first.created);
    assert_eq!(first.record.title, "Original title");
    assert_eq!(first.record.source, "Remotive");

    let second = repo
        .upsert(&candidate(url, "Refreshed title", SourceTag::LinkedIn))
        .await
        .unwrap();
    assert!(!second.created);
    assert_eq!(second.record.id, first.record.id);
    assert_eq!(second.record.title, "Refreshed title");
    assert_eq!(second.record.source, "LinkedIn");

    let all = repo.list(JobFilter::All).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn refresh_preserves_user_state_and_summary() {
    let (pool, _container) = setup_test_db().await;
    let repo = JobRepository::new(pool);

    let url = "https://jobs.example/keeper";
    let created = repo
        .upsert(&candidate(url, "Dev", SourceTag::Remotive))
        .await
        .unwrap();

    let favorited = repo
        .toggle_favorite(created.record.id)
        .await
        .unwrap()
        .unwrap();
    assert!(favorited.is_favorite);
    let favorited_at = favorited.favorited_at.unwrap();

    repo.set_ai_summary(created.record.id, "Resumo gerado")
        .await
        .unwrap();

    // Re-aggregation of the same URL with new descriptive data
    let refreshed = repo
        .upsert(&candidate(url, "Dev (updated)", SourceTag::Catho))
        .await
        .unwrap();

    assert_eq!(refreshed.record.title, "Dev (updated)");
    assert!(refreshed.record.is_favorite);
    assert_eq!(refreshed.record.favorited_at, Some(favorited_at));
    assert_eq!(refreshed.record.ai_summary.as_deref(), Some("Resumo gerado"));
}

#[tokio::test]
async fn toggle_twice_restores_flag_and_clears_timestamp() {
    let (pool, _container) = setup_test_db().await;
    let repo = JobRepository::new(pool);

    let created = repo
        .upsert(&candidate("https://jobs.example/t", "Dev", SourceTag::Jooble))
        .await
        .unwrap();
    let id = created.record.id;

    let on = repo.toggle_favorite(id).await.unwrap().unwrap();
    assert!(on.is_favorite);
    assert!(on.favorited_at.is_some());

    let off = repo.toggle_favorite(id).await.unwrap().unwrap();
    assert!(!off.is_favorite);
    assert!(off.favorited_at.is_none());

    let submitted = repo.toggle_submitted(id).await.unwrap().unwrap();
    assert!(submitted.is_submitted);
    assert!(submitted.submitted_at.is_some());
}

#[tokio::test]
async fn toggle_unknown_id_returns_none() {
    let (pool, _container) = setup_test_db().await;
    let repo = JobRepository::new(pool);

    let missing = repo.toggle_favorite(uuid::Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn list_filters_by_flag() {
    let (pool, _container) = setup_test_db().await;
    let repo = JobRepository::new(pool);

    let a = repo
        .upsert(&candidate("https://jobs.example/a", "A", SourceTag::Remotive))
        .await
        .unwrap();
    repo.upsert(&candidate("https://jobs.example/b", "B", SourceTag::Remotive))
        .await
        .unwrap();
    repo.toggle_favorite(a.record.id).await.unwrap();

    let favorites = repo.list(JobFilter::Favorite).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].url, "https://jobs.example/a");

    assert!(repo.list(JobFilter::Submitted).await.unwrap().is_empty());
    assert_eq!(repo.list(JobFilter::All).await.unwrap().len(), 2);
}

#[tokio::test]
async fn find_by_url_roundtrip() {
    let (pool, _container) = setup_test_db().await;
    let repo = JobRepository::new(pool);

    assert!(repo.find_by_url("https://jobs.example/nope").await.unwrap().is_none());

    repo.upsert(&candidate("https://jobs.example/f", "F", SourceTag::Arbeitnow))
        .await
        .unwrap();
    let found = repo.find_by_url("https://jobs.example/f").await.unwrap().unwrap();
    assert_eq!(found.salary.as_deref(), Some("BRL 9.000+"));
    assert_eq!(found.external_id.as_deref(), Some("ext-1"));
}
