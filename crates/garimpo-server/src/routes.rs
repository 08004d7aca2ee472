use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use garimpo_core::SearchPipeline;
use garimpo_core::catalog::{self, CourseFilters};
use garimpo_db::{JobFilter, UpdateSearchConfig};
use garimpo_sources::{GroqClient, JobBoard, capabilities};

use crate::dto::{
    CourseListResponse, CourseQuery, CourseResponse, ErrorResponse, HealthResponse,
    JobListResponse, JobResponse, ListJobsQuery, SearchResponse, SettingsResponse, StatusResponse,
    UpdateSettingsRequest,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/v1/search", post(run_search))
        .route("/v1/jobs", get(list_jobs))
        .route("/v1/jobs/{id}/favorite", post(toggle_favorite))
        .route("/v1/jobs/{id}/submitted", post(toggle_submitted))
        .route("/v1/settings", get(get_settings))
        .route("/v1/settings", put(update_settings))
        .route("/v1/status", get(status))
        .route("/v1/courses", get(list_courses));

    let public = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/v1/search",
    responses(
        (status = 200, description = "Aggregation run report", body = SearchResponse),
        (status = 400, description = "No keywords configured", body = ErrorResponse),
    ),
    tag = "search"
)]
pub async fn run_search(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let config_repo = state.db.config_repo();
    let config = config_repo.get_or_create().await?;

    let registry = JobBoard::from_env()?;
    let llm = GroqClient::from_env()?;
    let pipeline = SearchPipeline::new(registry, state.db.job_repo(), llm.clone(), llm);

    let report = pipeline.run(&config).await?;
    config_repo.touch_last_search().await?;

    Ok(axum::Json(SearchResponse::from(report)))
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/v1/jobs",
    params(ListJobsQuery),
    responses(
        (status = 200, description = "Stored jobs, newest first", body = JobListResponse),
    ),
    tag = "jobs"
)]
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListJobsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query
        .filter
        .as_deref()
        .unwrap_or("all")
        .parse::<JobFilter>()
        .map_err(garimpo_core::AppError::ConfigError)?;

    let jobs = state.db.job_repo().list(filter).await?;
    let total = jobs.len();

    let response = JobListResponse {
        jobs: jobs.into_iter().map(JobResponse::from).collect(),
        total,
    };

    Ok(axum::Json(response))
}

#[utoipa::path(
    post,
    path = "/v1/jobs/{id}/favorite",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Updated job", body = JobResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    tag = "jobs"
)]
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.db.job_repo().toggle_favorite(id).await?;
    Ok(toggle_response(id, updated))
}

#[utoipa::path(
    post,
    path = "/v1/jobs/{id}/submitted",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Updated job", body = JobResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    tag = "jobs"
)]
pub async fn toggle_submitted(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.db.job_repo().toggle_submitted(id).await?;
    Ok(toggle_response(id, updated))
}

fn toggle_response(
    id: Uuid,
    updated: Option<garimpo_core::models::JobRecord>,
) -> axum::response::Response {
    match updated {
        Some(record) => axum::Json(JobResponse::from(record)).into_response(),
        None => {
            let body = ErrorResponse {
                error: "not_found".to_string(),
                message: format!("Job not found: {id}"),
            };
            (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/v1/settings",
    responses(
        (status = 200, description = "Current search configuration", body = SettingsResponse),
    ),
    tag = "settings"
)]
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let config = state.db.config_repo().get_or_create().await?;
    Ok(axum::Json(SettingsResponse::from(config)))
}

#[utoipa::path(
    put,
    path = "/v1/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated search configuration", body = SettingsResponse),
    ),
    tag = "settings"
)]
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = state.db.config_repo();
    let current = repo.get_or_create().await?;

    let update = UpdateSearchConfig {
        keywords: body.keywords.unwrap_or(current.keywords),
        location: body.location.unwrap_or(current.location),
        interval_hours: body.interval_hours.unwrap_or(current.interval_hours),
        enabled_sources: body.enabled_sources.unwrap_or(current.enabled_sources),
        is_active: body.is_active.unwrap_or(current.is_active),
    };

    let config = repo.update(&update).await?;
    Ok(axum::Json(SettingsResponse::from(config)))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/v1/status",
    responses(
        (status = 200, description = "Per-integration credential presence", body = StatusResponse),
    ),
    tag = "system"
)]
pub async fn status() -> impl IntoResponse {
    axum::Json(StatusResponse::from(capabilities()))
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/v1/courses",
    params(CourseQuery),
    responses(
        (status = 200, description = "Ranked catalog matches plus stats", body = CourseListResponse),
    ),
    tag = "courses"
)]
pub async fn list_courses(Query(query): Query<CourseQuery>) -> impl IntoResponse {
    let filters = CourseFilters {
        query: query.q.unwrap_or_default(),
        modality: query.modality.and_then(|m| m.parse().ok()),
        level: query.level.and_then(|l| l.parse().ok()),
    };

    let courses = catalog::search_courses(&filters);
    let stats = catalog::course_stats();

    let response = CourseListResponse {
        courses: courses.into_iter().map(CourseResponse::from).collect(),
        stats: stats.into(),
    };

    axum::Json(response)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_status = match state.db.job_repo().health_check().await {
        Ok(()) => "ok",
        Err(_) => "error",
    };

    let status = if db_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if db_status == "ok" {
            "healthy"
        } else {
            "unhealthy"
        },
        database: db_status,
    };

    (status, axum::Json(response))
}
