use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use garimpo_core::catalog::{Course, CourseStats};
use garimpo_core::models::{JobRecord, SearchConfig, SearchReport};
use garimpo_sources::Capabilities;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SearchResponse {
    pub found: usize,
    pub saved: usize,
    pub summarized: usize,
    pub query_rewritten: bool,
    pub query: String,
}

impl From<SearchReport> for SearchResponse {
    fn from(report: SearchReport) -> Self {
        Self {
            found: report.found,
            saved: report.saved,
            summarized: report.summarized,
            query_rewritten: report.query_rewritten,
            query: report.query,
        }
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct JobResponse {
    pub id: Uuid,
    pub external_id: Option<String>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub salary: Option<String>,
    pub tags: Option<String>,
    pub ai_summary: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub is_submitted: bool,
    pub favorited_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl From<JobRecord> for JobResponse {
    fn from(record: JobRecord) -> Self {
        Self {
            id: record.id,
            external_id: record.external_id,
            title: record.title,
            company: record.company,
            location: record.location,
            description: record.description,
            url: record.url,
            source: record.source,
            salary: record.salary,
            tags: record.tags,
            ai_summary: record.ai_summary,
            posted_at: record.posted_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
            is_favorite: record.is_favorite,
            is_submitted: record.is_submitted,
            favorited_at: record.favorited_at,
            submitted_at: record.submitted_at,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListJobsQuery {
    /// "all" (default), "favorite" or "submitted"
    pub filter: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct JobListResponse {
    pub jobs: Vec<JobResponse>,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SettingsResponse {
    pub id: String,
    pub keywords: String,
    pub location: String,
    pub interval_hours: i32,
    pub enabled_sources: String,
    pub last_search_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<SearchConfig> for SettingsResponse {
    fn from(config: SearchConfig) -> Self {
        Self {
            id: config.id,
            keywords: config.keywords,
            location: config.location,
            interval_hours: config.interval_hours,
            enabled_sources: config.enabled_sources,
            last_search_at: config.last_search_at,
            is_active: config.is_active,
        }
    }
}

/// Partial update; omitted fields keep their current values.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateSettingsRequest {
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub interval_hours: Option<i32>,
    pub enabled_sources: Option<String>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct StatusResponse {
    pub groq: bool,
    pub rapid_api: bool,
    pub jooble: bool,
    pub openai: bool,
}

impl From<Capabilities> for StatusResponse {
    fn from(caps: Capabilities) -> Self {
        Self {
            groq: caps.groq,
            rapid_api: caps.rapid_api,
            jooble: caps.jooble,
            openai: caps.openai,
        }
    }
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct CourseQuery {
    /// Free-text terms, AND semantics
    pub q: Option<String>,
    /// "all" (default), "presencial", "ead" or "hibrido"
    pub modality: Option<String>,
    /// "all" (default), "pos-graduacao", "mestrado" or "doutorado"
    pub level: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CourseResponse {
    pub id: String,
    pub institution: String,
    pub program: String,
    pub level: String,
    pub modality: String,
    pub shift: String,
    pub area: String,
    pub city: String,
    pub state: String,
    pub duration: String,
    pub url: String,
    pub mec_recognized: bool,
    pub mec_grade: Option<u8>,
    pub price: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            institution: course.institution,
            program: course.program,
            level: course.level.as_str().to_string(),
            modality: course.modality.as_str().to_string(),
            shift: course.shift.as_str().to_string(),
            area: course.area,
            city: course.city,
            state: course.state,
            duration: course.duration,
            url: course.url,
            mec_recognized: course.mec_recognized,
            mec_grade: course.mec_grade,
            price: course.price,
            description: course.description,
            tags: course.tags,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CourseStatsResponse {
    pub total: usize,
    pub presencial: usize,
    pub ead: usize,
    pub mestrado: usize,
    pub pos_graduacao: usize,
    pub doutorado: usize,
    pub recife: usize,
    pub com_bolsa: usize,
}

impl From<CourseStats> for CourseStatsResponse {
    fn from(stats: CourseStats) -> Self {
        Self {
            total: stats.total,
            presencial: stats.presencial,
            ead: stats.ead,
            mestrado: stats.mestrado,
            pos_graduacao: stats.pos_graduacao,
            doutorado: stats.doutorado,
            recife: stats.recife,
            com_bolsa: stats.com_bolsa,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
    pub stats: CourseStatsResponse,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
