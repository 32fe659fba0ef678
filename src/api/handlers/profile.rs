//! Profile and automation preference management.

use axum::{extract::State, Extension, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PROFILE_TAG;
use crate::api::dto::{PreferencesRequest, ProfileResponse, UpdateProfileRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

pub fn profile_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_profile, update_profile))
        .routes(routes!(update_preferences))
}

/// Current profile.
#[utoipa::path(
    get,
    path = "",
    tag = PROFILE_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Current profile", body = ProfileResponse),
        (status = 401, description = "Not authenticated")
    )
)]
async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state.services.users.get_profile(auth.user_id).await?;
    Ok(Json(profile.into()))
}

/// Update profile fields.
#[utoipa::path(
    put,
    path = "",
    tag = PROFILE_TAG,
    security(("bearerAuth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request data")
    )
)]
async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state
        .services
        .users
        .update_profile(auth.user_id, payload.into())
        .await?;
    Ok(Json(profile.into()))
}

/// Update automation preferences: auto-apply flag, daily cap, preferred
/// job types and locations.
#[utoipa::path(
    put,
    path = "/preferences",
    tag = PROFILE_TAG,
    security(("bearerAuth" = [])),
    request_body = PreferencesRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request data")
    )
)]
async fn update_preferences(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<PreferencesRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state
        .services
        .users
        .update_profile(auth.user_id, payload.into())
        .await?;
    Ok(Json(profile.into()))
}
