//! Pipeline analytics.

use axum::{extract::State, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ANALYTICS_TAG;
use crate::error::AppResult;
use crate::services::AnalyticsSummary;
use crate::state::AppState;

pub fn analytics_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(summary))
}

/// Aggregate pipeline numbers: totals, status and source breakdowns,
/// recent event counts and the 30-day sync series.
#[utoipa::path(
    get,
    path = "/summary",
    tag = ANALYTICS_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Analytics summary", body = AnalyticsSummary)
    )
)]
async fn summary(State(state): State<AppState>) -> AppResult<Json<AnalyticsSummary>> {
    let summary = state.services.analytics.summary().await?;
    Ok(Json(summary))
}
