//! Site automation profile CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::WEBSITE_TAG;
use crate::api::dto::{CreateWebsiteRequest, UpdateWebsiteRequest, WebsiteResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::ValidatedJson;

pub fn website_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_websites, create_website))
        .routes(routes!(get_website, update_website, delete_website))
}

/// All configured sites.
#[utoipa::path(
    get,
    path = "",
    tag = WEBSITE_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Configured sites", body = [WebsiteResponse])
    )
)]
async fn list_websites(State(state): State<AppState>) -> AppResult<Json<Vec<WebsiteResponse>>> {
    let sites = state.services.automation.list_websites().await?;
    Ok(Json(sites.into_iter().map(Into::into).collect()))
}

/// Register a new site profile.
#[utoipa::path(
    post,
    path = "",
    tag = WEBSITE_TAG,
    security(("bearerAuth" = [])),
    request_body = CreateWebsiteRequest,
    responses(
        (status = 201, description = "Site created", body = WebsiteResponse),
        (status = 400, description = "Invalid request data"),
        (status = 409, description = "Site key already exists")
    )
)]
async fn create_website(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateWebsiteRequest>,
) -> AppResult<(StatusCode, Json<WebsiteResponse>)> {
    let site = state.services.automation.create_website(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(site.into())))
}

/// One site profile by key.
#[utoipa::path(
    get,
    path = "/{site_key}",
    tag = WEBSITE_TAG,
    security(("bearerAuth" = [])),
    params(("site_key" = String, Path, description = "Site key")),
    responses(
        (status = 200, description = "Site", body = WebsiteResponse),
        (status = 404, description = "Site not found")
    )
)]
async fn get_website(
    State(state): State<AppState>,
    Path(site_key): Path<String>,
) -> AppResult<Json<WebsiteResponse>> {
    let site = state.services.automation.get_website(&site_key).await?;
    Ok(Json(site.into()))
}

/// Update a site profile, including its selector config.
#[utoipa::path(
    put,
    path = "/{site_key}",
    tag = WEBSITE_TAG,
    security(("bearerAuth" = [])),
    params(("site_key" = String, Path, description = "Site key")),
    request_body = UpdateWebsiteRequest,
    responses(
        (status = 200, description = "Updated site", body = WebsiteResponse),
        (status = 404, description = "Site not found")
    )
)]
async fn update_website(
    State(state): State<AppState>,
    Path(site_key): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateWebsiteRequest>,
) -> AppResult<Json<WebsiteResponse>> {
    let site = state
        .services
        .automation
        .update_website(&site_key, payload.into())
        .await?;
    Ok(Json(site.into()))
}

/// Remove a site profile.
#[utoipa::path(
    delete,
    path = "/{site_key}",
    tag = WEBSITE_TAG,
    security(("bearerAuth" = [])),
    params(("site_key" = String, Path, description = "Site key")),
    responses(
        (status = 204, description = "Site deleted"),
        (status = 404, description = "Site not found")
    )
)]
async fn delete_website(
    State(state): State<AppState>,
    Path(site_key): Path<String>,
) -> AppResult<StatusCode> {
    state.services.automation.delete_website(&site_key).await?;
    Ok(StatusCode::NO_CONTENT)
}
