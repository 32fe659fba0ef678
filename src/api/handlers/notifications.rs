//! Notification settings.

use axum::{extract::State, Extension, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{NotificationSettingsResponse, UpdateNotificationSettingsRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_settings, update_settings))
}

/// Caller's notification settings. Users who never saved any get the
/// defaults.
#[utoipa::path(
    get,
    path = "",
    tag = NOTIFICATION_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Notification settings", body = NotificationSettingsResponse)
    )
)]
async fn get_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> AppResult<Json<NotificationSettingsResponse>> {
    let settings = state.services.notifications.settings_for(auth.user_id).await?;
    Ok(Json(settings.map_or_else(NotificationSettingsResponse::defaults, Into::into)))
}

/// Update (or create) the caller's notification settings.
#[utoipa::path(
    put,
    path = "",
    tag = NOTIFICATION_TAG,
    security(("bearerAuth" = [])),
    request_body = UpdateNotificationSettingsRequest,
    responses(
        (status = 200, description = "Updated settings", body = NotificationSettingsResponse),
        (status = 400, description = "Invalid request data")
    )
)]
async fn update_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<UpdateNotificationSettingsRequest>,
) -> AppResult<Json<NotificationSettingsResponse>> {
    let settings = state
        .services
        .notifications
        .update_settings(auth.user_id, payload.into())
        .await?;
    Ok(Json(settings.into()))
}
