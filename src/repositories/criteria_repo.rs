//! Saved search criteria repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{JobSearchCriteria, NewJobSearchCriteria, UpdateJobSearchCriteria};

#[derive(Clone)]
pub struct CriteriaRepository {
    pool: AsyncDbPool,
}

impl CriteriaRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, owner_id: i32) -> AppResult<Vec<JobSearchCriteria>> {
        use crate::schema::job_search_criteria::dsl::*;
        let mut conn = self.pool.get().await?;

        job_search_criteria
            .filter(user_id.eq(owner_id))
            .order(created_at.desc())
            .select(JobSearchCriteria::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn create(&self, new_criteria: NewJobSearchCriteria) -> AppResult<JobSearchCriteria> {
        use crate::schema::job_search_criteria::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(job_search_criteria)
            .values(&new_criteria)
            .returning(JobSearchCriteria::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Updates criteria scoped to its owner, so one user cannot reach
    /// another user's rows by id.
    pub async fn update(
        &self,
        criteria_id: i32,
        owner_id: i32,
        update_data: UpdateJobSearchCriteria,
    ) -> AppResult<JobSearchCriteria> {
        use crate::schema::job_search_criteria::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(
            job_search_criteria
                .filter(id.eq(criteria_id))
                .filter(user_id.eq(owner_id)),
        )
        .set((&update_data, updated_at.eq(diesel::dsl::now)))
        .returning(JobSearchCriteria::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| match e {
            diesel::result::Error::NotFound => AppError::NotFound {
                entity: "JobSearchCriteria".to_string(),
                field: "id".to_string(),
                value: criteria_id.to_string(),
            },
            _ => AppError::from(e),
        })
    }

    pub async fn delete(&self, criteria_id: i32, owner_id: i32) -> AppResult<()> {
        use crate::schema::job_search_criteria::dsl::*;
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(
            job_search_criteria
                .filter(id.eq(criteria_id))
                .filter(user_id.eq(owner_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(AppError::from)?;

        if deleted == 0 {
            return Err(AppError::NotFound {
                entity: "JobSearchCriteria".to_string(),
                field: "id".to_string(),
                value: criteria_id.to_string(),
            });
        }
        Ok(())
    }
}
