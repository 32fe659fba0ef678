//! Liveness endpoint. Unversioned and unauthenticated.

use axum::{extract::State, Json};
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::HealthResponse;
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health))
}

/// Process liveness plus a database round-trip. Reports `degraded`
/// instead of failing when the database is unreachable.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.db_pool.get().await {
        Ok(mut conn) => diesel::sql_query("SELECT 1").execute(&mut conn).await.is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not reach database");
            false
        }
    };

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}
