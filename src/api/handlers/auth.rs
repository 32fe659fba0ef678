//! Registration, login and token refresh.

use axum::{extract::State, http::StatusCode, Extension, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    AuthResponse, LoginRequest, ProfileResponse, RefreshRequest, RegisterRequest, TokenResponse,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Public authentication routes.
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
        .routes(routes!(refresh))
}

/// Routes that require a valid access token.
pub fn me_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(me))
}

/// Create a new applicant account.
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ProfileResponse),
        (status = 400, description = "Invalid request data"),
        (status = 409, description = "Email already registered")
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ProfileResponse>)> {
    let profile = state
        .services
        .users
        .register(payload.name, payload.email, &payload.password, payload.phone)
        .await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// Authenticate and receive an access/refresh token pair.
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account deactivated")
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (profile, tokens) = state
        .services
        .users
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(AuthResponse {
        profile: profile.into(),
        tokens: tokens.into(),
    }))
}

/// Exchange a refresh token for a new pair.
#[utoipa::path(
    post,
    path = "/refresh",
    tag = AUTH_TAG,
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = TokenResponse),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let tokens = state.services.users.refresh(&payload.refresh_token).await?;
    Ok(Json(tokens.into()))
}

/// Profile of the authenticated caller.
#[utoipa::path(
    get,
    path = "/me",
    tag = AUTH_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Current profile", body = ProfileResponse),
        (status = 401, description = "Not authenticated")
    )
)]
async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state.services.users.get_profile(auth.user_id).await?;
    Ok(Json(profile.into()))
}
