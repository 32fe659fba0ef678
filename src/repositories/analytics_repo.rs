//! Analytics event log and aggregation queries.

use chrono::NaiveDate;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Date, Text};
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{AnalyticsEvent, NewAnalyticsEvent};

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: AsyncDbPool,
}

impl AnalyticsRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, new_event: NewAnalyticsEvent) -> AppResult<AnalyticsEvent> {
        use crate::schema::analytics_events::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(analytics_events)
            .values(&new_event)
            .returning(AnalyticsEvent::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Event counts grouped by type.
    pub async fn totals_by_type(&self) -> AppResult<Vec<(String, i64)>> {
        use crate::schema::analytics_events::dsl::*;
        let mut conn = self.pool.get().await?;

        analytics_events
            .group_by(event_type)
            .select((event_type, count_star()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Per-day counts for one event type since `from_day`, oldest first.
    /// Raw SQL: diesel cannot type-check a group-by on a computed date.
    pub async fn daily_series(
        &self,
        kind: &str,
        from_day: NaiveDate,
    ) -> AppResult<Vec<(NaiveDate, i64)>> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<DailyRow> = diesel::sql_query(
            "SELECT created_at::date AS day, count(*) AS events \
             FROM analytics_events \
             WHERE event_type = $1 AND created_at::date >= $2 \
             GROUP BY day ORDER BY day ASC",
        )
        .bind::<Text, _>(kind)
        .bind::<Date, _>(from_day)
        .load(&mut conn)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(|r| (r.day, r.events)).collect())
    }
}

#[derive(QueryableByName)]
struct DailyRow {
    #[diesel(sql_type = Date)]
    day: NaiveDate,
    #[diesel(sql_type = BigInt)]
    events: i64,
}
