//! Router assembly.
//!
//! Every resource group is an `OpenApiRouter`, so the router tree and
//! the OpenAPI document are built from the same annotations. Everything
//! under `/api/v1` except the auth group sits behind the JWT layer.

use axum::{middleware, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{auth_middleware, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Builds the application router with all routes, the OpenAPI document
/// and the middleware stack.
pub fn create_router(state: AppState) -> Router {
    let protected = OpenApiRouter::new()
        .nest("/auth", handlers::auth::me_routes())
        .nest("/profile", handlers::profile::profile_routes())
        .nest("/criteria", handlers::criteria::criteria_routes())
        .nest("/jobs", handlers::jobs::job_routes())
        .nest("/sync", handlers::sync::sync_routes())
        .nest("/automation", handlers::automation::automation_routes())
        .nest("/websites", handlers::websites::website_routes())
        .nest("/resume", handlers::resume::resume_routes())
        .nest("/cover-letters", handlers::cover_letters::cover_letter_routes())
        .nest("/blacklist", handlers::blacklist::blacklist_routes())
        .nest("/notifications", handlers::notifications::notification_routes())
        .nest("/analytics", handlers::analytics::analytics_routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/v1/auth", handlers::auth::auth_routes())
        .nest("/api/v1", protected)
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        // Last added runs first, so request ids exist before logging.
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
