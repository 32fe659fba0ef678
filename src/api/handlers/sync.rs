//! Source sync triggering and source management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::SYNC_TAG;
use crate::api::dto::{SessionResponse, SourceResponse, SyncTriggerRequest, UpdateSourceRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::external::boards::SearchQuery;
use crate::state::AppState;
use crate::utils::ValidatedJson;

pub fn sync_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(trigger_sync))
        .routes(routes!(get_session))
        .routes(routes!(list_sources))
        .routes(routes!(update_source))
}

/// Start a sync run across the enabled sources. The run executes in the
/// background; poll the returned session for progress.
#[utoipa::path(
    post,
    path = "",
    tag = SYNC_TAG,
    security(("bearerAuth" = [])),
    request_body = SyncTriggerRequest,
    responses(
        (status = 202, description = "Sync started", body = SessionResponse),
        (status = 400, description = "Invalid request or no matching sources")
    )
)]
async fn trigger_sync(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<SyncTriggerRequest>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    let query = SearchQuery::new(
        payload.keywords,
        payload.location.unwrap_or_default(),
        payload.limit,
    );
    let session = state
        .services
        .sync
        .start(Some(auth.user_id), query, payload.sources)
        .await?;
    Ok((StatusCode::ACCEPTED, Json(session.into())))
}

/// Status and counters of one sync or automation session. Finished sync
/// runs carry their per-source fetch/new/duplicate/failed breakdown.
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = SYNC_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session", body = SessionResponse),
        (status = 404, description = "Session not found")
    )
)]
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<SessionResponse>> {
    let session = state.services.sync.get_session(id).await?;
    Ok(Json(session.into()))
}

/// All registered ingestion sources.
#[utoipa::path(
    get,
    path = "/sources",
    tag = SYNC_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Sources", body = [SourceResponse])
    )
)]
async fn list_sources(State(state): State<AppState>) -> AppResult<Json<Vec<SourceResponse>>> {
    let sources = state.services.sync.list_sources().await?;
    Ok(Json(sources.into_iter().map(Into::into).collect()))
}

/// Enable/disable a source or adjust its per-run cap.
#[utoipa::path(
    patch,
    path = "/sources/{id}",
    tag = SYNC_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Source id")),
    request_body = UpdateSourceRequest,
    responses(
        (status = 200, description = "Updated source", body = SourceResponse),
        (status = 404, description = "Source not found")
    )
)]
async fn update_source(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateSourceRequest>,
) -> AppResult<Json<SourceResponse>> {
    let source = state.services.sync.update_source(id, payload.into()).await?;
    Ok(Json(source.into()))
}
