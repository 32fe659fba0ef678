//! Saved search criteria CRUD, scoped to the authenticated user.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CRITERIA_TAG;
use crate::api::dto::{CreateCriteriaRequest, CriteriaResponse, UpdateCriteriaRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

pub fn criteria_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_criteria, create_criteria))
        .routes(routes!(update_criteria, delete_criteria))
}

/// All criteria saved by the caller.
#[utoipa::path(
    get,
    path = "",
    tag = CRITERIA_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Saved criteria", body = [CriteriaResponse])
    )
)]
async fn list_criteria(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> AppResult<Json<Vec<CriteriaResponse>>> {
    let criteria = state.services.criteria.list(auth.user_id).await?;
    Ok(Json(criteria.into_iter().map(Into::into).collect()))
}

/// Save a new search criteria set.
#[utoipa::path(
    post,
    path = "",
    tag = CRITERIA_TAG,
    security(("bearerAuth" = [])),
    request_body = CreateCriteriaRequest,
    responses(
        (status = 201, description = "Criteria created", body = CriteriaResponse),
        (status = 400, description = "Invalid request data")
    )
)]
async fn create_criteria(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateCriteriaRequest>,
) -> AppResult<(StatusCode, Json<CriteriaResponse>)> {
    let criteria = state
        .services
        .criteria
        .create(payload.into_model(auth.user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(criteria.into())))
}

/// Update one of the caller's criteria sets.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = CRITERIA_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Criteria id")),
    request_body = UpdateCriteriaRequest,
    responses(
        (status = 200, description = "Updated criteria", body = CriteriaResponse),
        (status = 404, description = "Criteria not found")
    )
)]
async fn update_criteria(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCriteriaRequest>,
) -> AppResult<Json<CriteriaResponse>> {
    let criteria = state
        .services
        .criteria
        .update(id, auth.user_id, payload.into())
        .await?;
    Ok(Json(criteria.into()))
}

/// Delete one of the caller's criteria sets.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CRITERIA_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Criteria id")),
    responses(
        (status = 204, description = "Criteria deleted"),
        (status = 404, description = "Criteria not found")
    )
)]
async fn delete_criteria(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.criteria.delete(id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
