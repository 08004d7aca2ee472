use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garimpo API",
        version = "0.1.0",
        description = "Multi-source job aggregation with LLM enrichment and a course catalog."
    ),
    paths(
        crate::routes::run_search,
        crate::routes::list_jobs,
        crate::routes::toggle_favorite,
        crate::routes::toggle_submitted,
        crate::routes::get_settings,
        crate::routes::update_settings,
        crate::routes::status,
        crate::routes::list_courses,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::SearchResponse,
        crate::dto::JobResponse,
        crate::dto::JobListResponse,
        crate::dto::SettingsResponse,
        crate::dto::UpdateSettingsRequest,
        crate::dto::StatusResponse,
        crate::dto::CourseResponse,
        crate::dto::CourseStatsResponse,
        crate::dto::CourseListResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "search", description = "Multi-source aggregation runs"),
        (name = "jobs", description = "Stored job postings"),
        (name = "settings", description = "Search configuration"),
        (name = "courses", description = "Course catalog"),
        (name = "system", description = "Health and capability status"),
    )
)]
pub struct ApiDoc;
