//! Job application repository.
//!
//! `job_applications.url` is unique; `insert_if_absent` leans on that
//! constraint for ingestion dedup instead of app-level locks.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{JobApplication, JobStatus, NewJobApplication, UpdateJobApplication};

/// Filters for paginated job listing.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub source: Option<String>,
    pub min_score: Option<i32>,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Clone)]
pub struct JobApplicationRepository {
    pool: AsyncDbPool,
}

impl JobApplicationRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts unless a row with the same URL already exists.
    ///
    /// Returns `None` for the duplicate case; the existing row is left
    /// untouched. Concurrent inserts of the same URL are resolved by the
    /// database constraint, so re-running a batch is idempotent.
    pub async fn insert_if_absent(
        &self,
        new_job: NewJobApplication,
    ) -> AppResult<Option<JobApplication>> {
        use crate::schema::job_applications::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(job_applications)
            .values(&new_job)
            .on_conflict(url)
            .do_nothing()
            .returning(JobApplication::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn get(&self, job_id: i32) -> AppResult<JobApplication> {
        use crate::schema::job_applications::dsl::*;
        let mut conn = self.pool.get().await?;

        job_applications
            .filter(id.eq(job_id))
            .filter(is_active.eq(true))
            .select(JobApplication::as_select())
            .first(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "JobApplication".to_string(),
                    field: "id".to_string(),
                    value: job_id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    pub async fn find_by_url(&self, job_url: &str) -> AppResult<Option<JobApplication>> {
        use crate::schema::job_applications::dsl::*;
        let mut conn = self.pool.get().await?;

        job_applications
            .filter(url.eq(job_url))
            .select(JobApplication::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Paginated listing of active applications with optional filters.
    /// Returns the page and the total row count for the filter.
    pub async fn list(&self, filter: &JobFilter) -> AppResult<(Vec<JobApplication>, i64)> {
        use crate::schema::job_applications::dsl::*;
        let mut conn = self.pool.get().await?;

        let mut query = job_applications.filter(is_active.eq(true)).into_boxed();
        let mut count_query = job_applications.filter(is_active.eq(true)).into_boxed();

        if let Some(filter_status) = filter.status {
            query = query.filter(status.eq(filter_status));
            count_query = count_query.filter(status.eq(filter_status));
        }
        if let Some(ref filter_source) = filter.source {
            query = query.filter(source.eq(filter_source.clone()));
            count_query = count_query.filter(source.eq(filter_source.clone()));
        }
        if let Some(score) = filter.min_score {
            query = query.filter(match_score.ge(score));
            count_query = count_query.filter(match_score.ge(score));
        }

        let total = count_query
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(AppError::from)?;

        let page = filter.page.max(1);
        let per_page = filter.per_page.clamp(1, 100);
        let rows = query
            .order(created_at.desc())
            .limit(per_page)
            .offset((page - 1) * per_page)
            .select(JobApplication::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok((rows, total))
    }

    pub async fn update(
        &self,
        job_id: i32,
        update_data: UpdateJobApplication,
    ) -> AppResult<JobApplication> {
        use crate::schema::job_applications::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(job_applications.filter(id.eq(job_id)))
            .set((&update_data, updated_at.eq(diesel::dsl::now)))
            .returning(JobApplication::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "JobApplication".to_string(),
                    field: "id".to_string(),
                    value: job_id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    /// Soft delete; the row stays for dedup so the same URL is not
    /// re-ingested on the next sync.
    pub async fn soft_delete(&self, job_id: i32) -> AppResult<()> {
        use crate::schema::job_applications::dsl::*;
        let mut conn = self.pool.get().await?;

        let updated = diesel::update(job_applications.filter(id.eq(job_id)))
            .set((is_active.eq(false), updated_at.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        if updated == 0 {
            return Err(AppError::NotFound {
                entity: "JobApplication".to_string(),
                field: "id".to_string(),
                value: job_id.to_string(),
            });
        }
        Ok(())
    }

    pub async fn count_by_status(&self) -> AppResult<Vec<(JobStatus, i64)>> {
        use crate::schema::job_applications::dsl::*;
        let mut conn = self.pool.get().await?;

        job_applications
            .filter(is_active.eq(true))
            .group_by(status)
            .select((status, diesel::dsl::count_star()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn count_by_source(&self) -> AppResult<Vec<(String, i64)>> {
        use crate::schema::job_applications::dsl::*;
        let mut conn = self.pool.get().await?;

        job_applications
            .filter(is_active.eq(true))
            .group_by(source)
            .select((source, diesel::dsl::count_star()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
