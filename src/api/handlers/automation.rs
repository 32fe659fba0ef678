//! Browser automation session control.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTOMATION_TAG;
use crate::api::dto::{LogResponse, SessionResponse, StartAutomationRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

const RECENT_SESSIONS: i64 = 20;

pub fn automation_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(start_session, list_sessions))
        .routes(routes!(get_session))
        .routes(routes!(cancel_session))
        .routes(routes!(session_logs))
}

/// Start an automation run against one configured site. The browser
/// work happens in the background; poll the session for progress.
#[utoipa::path(
    post,
    path = "/sessions",
    tag = AUTOMATION_TAG,
    security(("bearerAuth" = [])),
    request_body = StartAutomationRequest,
    responses(
        (status = 202, description = "Session started", body = SessionResponse),
        (status = 400, description = "Site disabled or selectors invalid"),
        (status = 404, description = "Unknown site key"),
        (status = 500, description = "Concurrent session limit reached")
    )
)]
async fn start_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<StartAutomationRequest>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    let session = state
        .services
        .automation
        .start(
            Some(auth.user_id),
            &payload.site_key,
            payload.keywords,
            payload.location,
            payload.auto_apply,
        )
        .await?;
    Ok((StatusCode::ACCEPTED, Json(session.into())))
}

/// Most recent sessions, newest first.
#[utoipa::path(
    get,
    path = "/sessions",
    tag = AUTOMATION_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Recent sessions", body = [SessionResponse])
    )
)]
async fn list_sessions(State(state): State<AppState>) -> AppResult<Json<Vec<SessionResponse>>> {
    let sessions = state.services.automation.list_recent(RECENT_SESSIONS).await?;
    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

/// One session with its counters.
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = AUTOMATION_TAG,
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
    let session = state.services.automation.get(id).await?;
    Ok(Json(session.into()))
}

/// Request cancellation of a running session. The engine stops at the
/// next card boundary.
#[utoipa::path(
    post,
    path = "/sessions/{id}/cancel",
    tag = AUTOMATION_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Session id")),
    responses(
        (status = 202, description = "Cancellation requested"),
        (status = 404, description = "Session not found"),
        (status = 422, description = "Session is not running")
    )
)]
async fn cancel_session(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.services.automation.cancel(id).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Audit log lines for one session, oldest first.
#[utoipa::path(
    get,
    path = "/sessions/{id}/logs",
    tag = AUTOMATION_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session logs", body = [LogResponse]),
        (status = 404, description = "Session not found")
    )
)]
async fn session_logs(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<LogResponse>>> {
    let logs = state.services.automation.logs(id).await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}
