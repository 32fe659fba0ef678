//! Job source registry, raw fetch results and per-day API usage.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    ApiUsage, JobSource, NewApiUsage, NewExternalJobResult, SourceStatus, UpdateJobSource,
};

#[derive(Clone)]
pub struct SourceRepository {
    pool: AsyncDbPool,
}

impl SourceRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<JobSource>> {
        use crate::schema::job_sources::dsl::*;
        let mut conn = self.pool.get().await?;

        job_sources
            .order(name.asc())
            .select(JobSource::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_enabled(&self) -> AppResult<Vec<JobSource>> {
        use crate::schema::job_sources::dsl::*;
        let mut conn = self.pool.get().await?;

        job_sources
            .filter(enabled.eq(true))
            .order(name.asc())
            .select(JobSource::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_name(&self, source_name: &str) -> AppResult<Option<JobSource>> {
        use crate::schema::job_sources::dsl::*;
        let mut conn = self.pool.get().await?;

        job_sources
            .filter(name.eq(source_name))
            .select(JobSource::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn update(&self, source_id: i32, update_data: UpdateJobSource) -> AppResult<JobSource> {
        use crate::schema::job_sources::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(job_sources.filter(id.eq(source_id)))
            .set(&update_data)
            .returning(JobSource::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "JobSource".to_string(),
                    field: "id".to_string(),
                    value: source_id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    pub async fn set_status(&self, source_id: i32, new_status: SourceStatus) -> AppResult<()> {
        use crate::schema::job_sources::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(job_sources.filter(id.eq(source_id)))
            .set(status.eq(new_status))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    /// Marks a successful sync: bumps `total_jobs` and `last_sync`, and
    /// resets the status to active.
    pub async fn record_sync(&self, source_id: i32, jobs_added: i32) -> AppResult<()> {
        use crate::schema::job_sources::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(job_sources.filter(id.eq(source_id)))
            .set((
                total_jobs.eq(total_jobs + jobs_added),
                last_sync.eq(diesel::dsl::now),
                status.eq(SourceStatus::Active),
            ))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    /// Archives raw fetched listings for audit. `url` is unique, so a
    /// resync re-archiving known listings keeps the new rows instead of
    /// aborting the batch.
    pub async fn insert_external_results(
        &self,
        results: Vec<NewExternalJobResult>,
    ) -> AppResult<usize> {
        use crate::schema::external_job_results::dsl::*;
        if results.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await?;

        diesel::insert_into(external_job_results)
            .values(&results)
            .on_conflict(url)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Adds to today's request counter, creating the row on first use.
    pub async fn record_usage(
        &self,
        usage_source_id: i32,
        day: NaiveDate,
        requests: i32,
    ) -> AppResult<()> {
        use crate::schema::api_usage::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(api_usage)
            .values(&NewApiUsage {
                source_id: usage_source_id,
                usage_date: day,
                requests_made: requests,
                quota: None,
            })
            .on_conflict((source_id, usage_date))
            .do_update()
            .set(requests_made.eq(requests_made + requests))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    pub async fn usage_for_day(
        &self,
        usage_source_id: i32,
        day: NaiveDate,
    ) -> AppResult<Option<ApiUsage>> {
        use crate::schema::api_usage::dsl::*;
        let mut conn = self.pool.get().await?;

        api_usage
            .filter(source_id.eq(usage_source_id))
            .filter(usage_date.eq(day))
            .select(ApiUsage::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
