//! Tracked job applications: listing, status moves, analysis, stats.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use validator::Validate;

use crate::api::doc::JOB_TAG;
use crate::api::dto::{
    AnalyzeResponse, JobListQuery, JobResponse, JobStatsResponse, PagedResponse,
    StatusUpdateRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

pub fn job_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_jobs))
        .routes(routes!(job_stats))
        .routes(routes!(get_job, delete_job))
        .routes(routes!(update_status))
        .routes(routes!(analyze_job))
}

/// Paginated job list with status, source and score filters.
#[utoipa::path(
    get,
    path = "",
    tag = JOB_TAG,
    security(("bearerAuth" = [])),
    params(JobListQuery),
    responses(
        (status = 200, description = "Job page", body = PagedResponse<JobResponse>),
        (status = 400, description = "Invalid filters")
    )
)]
async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> AppResult<Json<PagedResponse<JobResponse>>> {
    query.validate()?;
    let (jobs, total) = state.services.jobs.list(&query.to_filter()).await?;
    let data = jobs.into_iter().map(JobResponse::from).collect();
    Ok(Json(PagedResponse::new(
        data,
        query.page,
        query.page_size,
        total as u64,
    )))
}

/// Status and source breakdown across all active jobs.
#[utoipa::path(
    get,
    path = "/stats",
    tag = JOB_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Job statistics", body = JobStatsResponse)
    )
)]
async fn job_stats(State(state): State<AppState>) -> AppResult<Json<JobStatsResponse>> {
    let stats = state.services.jobs.stats().await?;
    Ok(Json(stats.into()))
}

/// One tracked job.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = JOB_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job", body = JobResponse),
        (status = 404, description = "Job not found")
    )
)]
async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<JobResponse>> {
    let job = state.services.jobs.get(id).await?;
    Ok(Json(job.into()))
}

/// Soft-delete a job. It disappears from lists but stays in the
/// database for dedup purposes.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = JOB_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "Job not found")
    )
)]
async fn delete_job(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.services.jobs.soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move a job along its lifecycle. Illegal transitions, including any
/// move out of `rejected` or `offer`, are rejected with 422.
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = JOB_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Job id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated job", body = JobResponse),
        (status = 404, description = "Job not found"),
        (status = 422, description = "Illegal status transition")
    )
)]
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<JobResponse>> {
    let job = state
        .services
        .jobs
        .transition_status(id, payload.status)
        .await?;
    Ok(Json(job.into()))
}

/// Score the job against the caller's profile. A freshly found job
/// advances to `analyzed`.
#[utoipa::path(
    post,
    path = "/{id}/analyze",
    tag = JOB_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 200, description = "Match verdict", body = AnalyzeResponse),
        (status = 404, description = "Job not found")
    )
)]
async fn analyze_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<AnalyzeResponse>> {
    let profile = state.services.users.get_profile(auth.user_id).await?;
    let (job, verdict) = state.services.jobs.analyze(id, &profile).await?;
    Ok(Json(AnalyzeResponse::new(job, verdict)))
}
