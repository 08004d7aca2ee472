use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use garimpo_core::error::AppError;
use garimpo_core::models::{JobCandidate, JobRecord, UpsertOutcome};

/// Listing filter for the jobs surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobFilter {
    #[default]
    All,
    Favorite,
    Submitted,
}

impl std::str::FromStr for JobFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(JobFilter::All),
            "favorite" => Ok(JobFilter::Favorite),
            "submitted" => Ok(JobFilter::Submitted),
            other => Err(format!("unknown job filter: {other}")),
        }
    }
}

/// PostgreSQL-backed job store, keyed by URL for dedup.
#[derive(Clone)]
pub struct JobRepository {
    pool: Pool<Postgres>,
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    external_id: Option<String>,
    title: String,
    company: String,
    location: String,
    description: String,
    url: String,
    source: String,
    salary: Option<String>,
    tags: Option<String>,
    ai_summary: Option<String>,
    posted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_favorite: bool,
    is_submitted: bool,
    favorited_at: Option<DateTime<Utc>>,
    submitted_at: Option<DateTime<Utc>>,
}

impl From<JobRow> for JobRecord {
    fn from(row: JobRow) -> Self {
        JobRecord {
            id: row.id,
            external_id: row.external_id,
            title: row.title,
            company: row.company,
            location: row.location,
            description: row.description,
            url: row.url,
            source: row.source,
            salary: row.salary,
            tags: row.tags,
            ai_summary: row.ai_summary,
            posted_at: row.posted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_favorite: row.is_favorite,
            is_submitted: row.is_submitted,
            favorited_at: row.favorited_at,
            submitted_at: row.submitted_at,
        }
    }
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_url(&self, url: &str) -> Result<Option<JobRecord>, AppError> {
        let row = sqlx::query_as::<_, JobRow>(r#"SELECT * FROM jobs WHERE url = $1"#)
            .bind(url)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(row.map(Into::into))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<JobRecord>, AppError> {
        let row = sqlx::query_as::<_, JobRow>(r#"SELECT * FROM jobs WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(row.map(Into::into))
    }

    /// Upsert keyed by URL.
    ///
    /// Existing records get their descriptive fields refreshed; favorite/
    /// submitted state, their timestamps and `ai_summary` are never written
    /// here. A unique-violation race between the lookup and the insert
    /// surfaces as `DatabaseError` — callers skip that candidate and move on.
    pub async fn upsert(&self, candidate: &JobCandidate) -> Result<UpsertOutcome, AppError> {
        if self.find_by_url(&candidate.url).await?.is_some() {
            let row = sqlx::query_as::<_, JobRow>(
                r#"
                UPDATE jobs
                SET title = $2, company = $3, location = $4, description = $5,
                    source = $6, salary = $7, tags = $8, posted_at = $9,
                    updated_at = NOW()
                WHERE url = $1
                RETURNING *
                "#,
            )
            .bind(&candidate.url)
            .bind(&candidate.title)
            .bind(&candidate.company)
            .bind(&candidate.location)
            .bind(&candidate.description)
            .bind(candidate.source.label())
            .bind(&candidate.salary)
            .bind(&candidate.tags)
            .bind(candidate.posted_at)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

            Ok(UpsertOutcome {
                record: row.into(),
                created: false,
            })
        } else {
            let row = sqlx::query_as::<_, JobRow>(
                r#"
                INSERT INTO jobs (external_id, title, company, location, description,
                                  url, source, salary, tags, posted_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
                "#,
            )
            .bind(&candidate.external_id)
            .bind(&candidate.title)
            .bind(&candidate.company)
            .bind(&candidate.location)
            .bind(&candidate.description)
            .bind(&candidate.url)
            .bind(candidate.source.label())
            .bind(&candidate.salary)
            .bind(&candidate.tags)
            .bind(candidate.posted_at)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

            tracing::debug!(url = %candidate.url, source = %candidate.source, "Created job record");

            Ok(UpsertOutcome {
                record: row.into(),
                created: true,
            })
        }
    }

    pub async fn list(&self, filter: JobFilter) -> Result<Vec<JobRecord>, AppError> {
        let query = match filter {
            JobFilter::All => r#"SELECT * FROM jobs ORDER BY created_at DESC"#,
            JobFilter::Favorite => {
                r#"SELECT * FROM jobs WHERE is_favorite ORDER BY created_at DESC"#
            }
            JobFilter::Submitted => {
                r#"SELECT * FROM jobs WHERE is_submitted ORDER BY created_at DESC"#
            }
        };

        let rows = sqlx::query_as::<_, JobRow>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Flip the favorite flag; the paired timestamp flips with it in the
    /// same statement (set on false→true, cleared on true→false).
    pub async fn toggle_favorite(&self, id: Uuid) -> Result<Option<JobRecord>, AppError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET is_favorite = NOT is_favorite,
                favorited_at = CASE WHEN is_favorite THEN NULL ELSE NOW() END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Into::into))
    }

    /// Flip the submitted flag, same timestamp semantics as favorites.
    pub async fn toggle_submitted(&self, id: Uuid) -> Result<Option<JobRecord>, AppError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET is_submitted = NOT is_submitted,
                submitted_at = CASE WHEN is_submitted THEN NULL ELSE NOW() END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Into::into))
    }

    pub async fn set_ai_summary(&self, id: Uuid, summary: &str) -> Result<(), AppError> {
        sqlx::query(r#"UPDATE jobs SET ai_summary = $2, updated_at = NOW() WHERE id = $1"#)
            .bind(id)
            .bind(summary)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

fn db_err(e: sqlx::Error) -> AppError {
    AppError::DatabaseError(e.to_string())
}

// -- Trait implementation --

impl garimpo_core::traits::JobStore for JobRepository {
    async fn upsert(&self, candidate: &JobCandidate) -> Result<UpsertOutcome, AppError> {
        JobRepository::upsert(self, candidate).await
    }

    async fn set_ai_summary(&self, id: Uuid, summary: &str) -> Result<(), AppError> {
        JobRepository::set_ai_summary(self, id, summary).await
    }
}
