//! Cover letter generation and listing.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::COVER_LETTER_TAG;
use crate::api::dto::{CoverLetterQuery, CoverLetterResponse, GenerateCoverLetterRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

pub fn cover_letter_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(generate_cover_letter, list_cover_letters))
}

/// Generate a cover letter for a tracked job. Uses the LLM when
/// configured, otherwise a deterministic template.
#[utoipa::path(
    post,
    path = "",
    tag = COVER_LETTER_TAG,
    security(("bearerAuth" = [])),
    request_body = GenerateCoverLetterRequest,
    responses(
        (status = 201, description = "Letter generated", body = CoverLetterResponse),
        (status = 404, description = "Job not found")
    )
)]
async fn generate_cover_letter(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<GenerateCoverLetterRequest>,
) -> AppResult<(StatusCode, Json<CoverLetterResponse>)> {
    let profile = state.services.users.get_profile(auth.user_id).await?;
    let letter = state
        .services
        .jobs
        .generate_cover_letter(payload.job_id, &profile)
        .await?;
    Ok((StatusCode::CREATED, Json(letter.into())))
}

/// Stored letters, optionally restricted to one job.
#[utoipa::path(
    get,
    path = "",
    tag = COVER_LETTER_TAG,
    security(("bearerAuth" = [])),
    params(CoverLetterQuery),
    responses(
        (status = 200, description = "Cover letters", body = [CoverLetterResponse])
    )
)]
async fn list_cover_letters(
    State(state): State<AppState>,
    Query(query): Query<CoverLetterQuery>,
) -> AppResult<Json<Vec<CoverLetterResponse>>> {
    let letters = state.services.jobs.list_cover_letters(query.job_id).await?;
    Ok(Json(letters.into_iter().map(Into::into).collect()))
}
