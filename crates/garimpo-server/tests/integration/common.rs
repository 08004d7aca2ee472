use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

use garimpo_db::Database;
use garimpo_server::routes;
use garimpo_server::state::AppState;

/// SQL migration statements, executed one at a time.
const MIGRATIONS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS jobs (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        external_id VARCHAR,
        title VARCHAR NOT NULL,
        company VARCHAR NOT NULL,
        location VARCHAR NOT NULL,
        description TEXT NOT NULL,
        url VARCHAR NOT NULL UNIQUE,
        source VARCHAR(32) NOT NULL,
        salary VARCHAR,
        tags TEXT,
        ai_summary TEXT,
        posted_at TIMESTAMPTZ,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        is_favorite BOOLEAN NOT NULL DEFAULT FALSE,
        is_submitted BOOLEAN NOT NULL DEFAULT FALSE,
        favorited_at TIMESTAMPTZ,
        submitted_at TIMESTAMPTZ
    )"#,
    r#"CREATE TABLE IF NOT EXISTS search_config (
        id VARCHAR PRIMARY KEY,
        keywords VARCHAR NOT NULL DEFAULT '',
        location VARCHAR NOT NULL DEFAULT '',
        interval_hours INTEGER NOT NULL DEFAULT 6,
        enabled_sources VARCHAR NOT NULL DEFAULT '',
        last_search_at TIMESTAMPTZ,
        is_active BOOLEAN NOT NULL DEFAULT TRUE
    )"#,
];

pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    _container: ContainerAsync<GenericImage>,
}

/// Spins up PostgreSQL, runs migrations and builds the full router.
pub async fn setup_test_app() -> TestApp {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "garimpo_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let connection_string = format!("postgresql://postgres:postgres@{host}:{port}/garimpo_test");

    const MAX_RETRIES: u32 = 30;
    let mut retries = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .connect(&connection_string)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retries += 1;
                if retries >= MAX_RETRIES {
                    panic!("Failed to connect to database after {MAX_RETRIES} retries: {e}");
                }
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
        }
    };

    for migration in MIGRATIONS {
        sqlx::query(migration)
            .execute(&pool)
            .await
            .expect("Failed to run migration");
    }

    let db = Database::from_pool(pool.clone());
    let state = Arc::new(AppState { db });
    let router = routes::router(state);

    TestApp {
        router,
        pool,
        _container: container,
    }
}
