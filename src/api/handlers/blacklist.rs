//! Company blacklist management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::BLACKLIST_TAG;
use crate::api::dto::{BlacklistResponse, CreateBlacklistRequest};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

pub fn blacklist_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_blacklist, add_to_blacklist))
        .routes(routes!(remove_from_blacklist))
}

/// All blacklisted companies.
#[utoipa::path(
    get,
    path = "",
    tag = BLACKLIST_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Blacklist entries", body = [BlacklistResponse])
    )
)]
async fn list_blacklist(State(state): State<AppState>) -> AppResult<Json<Vec<BlacklistResponse>>> {
    let entries = state.services.automation.list_blacklist().await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Blacklist a company. Automation runs skip its postings.
#[utoipa::path(
    post,
    path = "",
    tag = BLACKLIST_TAG,
    security(("bearerAuth" = [])),
    request_body = CreateBlacklistRequest,
    responses(
        (status = 201, description = "Entry created", body = BlacklistResponse),
        (status = 409, description = "Company already blacklisted")
    )
)]
async fn add_to_blacklist(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBlacklistRequest>,
) -> AppResult<(StatusCode, Json<BlacklistResponse>)> {
    let entry = state.services.automation.add_to_blacklist(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// Remove a blacklist entry.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = BLACKLIST_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry removed"),
        (status = 404, description = "Entry not found")
    )
)]
async fn remove_from_blacklist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.automation.remove_from_blacklist(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
