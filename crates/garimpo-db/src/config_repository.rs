use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};

use garimpo_core::error::AppError;
use garimpo_core::models::{DEFAULT_CONFIG_ID, SearchConfig};

/// Fields accepted by a settings update. `last_search_at` is excluded on
/// purpose — it is only ever touched by [`ConfigRepository::touch_last_search`].
#[derive(Debug, Clone)]
pub struct UpdateSearchConfig {
    pub keywords: String,
    pub location: String,
    pub interval_hours: i32,
    pub enabled_sources: String,
    pub is_active: bool,
}

/// Repository for the singleton search-config row.
#[derive(Clone)]
pub struct ConfigRepository {
    pool: Pool<Postgres>,
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct ConfigRow {
    id: String,
    keywords: String,
    location: String,
    interval_hours: i32,
    enabled_sources: String,
    last_search_at: Option<DateTime<Utc>>,
    is_active: bool,
}

impl From<ConfigRow> for SearchConfig {
    fn from(row: ConfigRow) -> Self {
        SearchConfig {
            id: row.id,
            keywords: row.keywords,
            location: row.location,
            interval_hours: row.interval_hours,
            enabled_sources: row.enabled_sources,
            last_search_at: row.last_search_at,
            is_active: row.is_active,
        }
    }
}

impl ConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the config row, creating the default one if it doesn't exist.
    pub async fn get_or_create(&self) -> Result<SearchConfig, AppError> {
        sqlx::query(r#"INSERT INTO search_config (id) VALUES ($1) ON CONFLICT (id) DO NOTHING"#)
            .bind(DEFAULT_CONFIG_ID)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        let row = sqlx::query_as::<_, ConfigRow>(r#"SELECT * FROM search_config WHERE id = $1"#)
            .bind(DEFAULT_CONFIG_ID)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(row.into())
    }

    /// Upsert the full settings payload.
    pub async fn update(&self, update: &UpdateSearchConfig) -> Result<SearchConfig, AppError> {
        let row = sqlx::query_as::<_, ConfigRow>(
            r#"
            INSERT INTO search_config (id, keywords, location, interval_hours, enabled_sources, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                keywords = EXCLUDED.keywords,
                location = EXCLUDED.location,
                interval_hours = EXCLUDED.interval_hours,
                enabled_sources = EXCLUDED.enabled_sources,
                is_active = EXCLUDED.is_active
            RETURNING *
            "#,
        )
        .bind(DEFAULT_CONFIG_ID)
        .bind(&update.keywords)
        .bind(&update.location)
        .bind(update.interval_hours)
        .bind(&update.enabled_sources)
        .bind(update.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.into())
    }

    /// Stamp the completion time of a search run.
    pub async fn touch_last_search(&self) -> Result<(), AppError> {
        sqlx::query(r#"UPDATE search_config SET last_search_at = NOW() WHERE id = $1"#)
            .bind(DEFAULT_CONFIG_ID)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}

fn db_err(e: sqlx::Error) -> AppError {
    AppError::DatabaseError(e.to_string())
}
