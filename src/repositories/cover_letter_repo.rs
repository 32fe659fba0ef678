//! Generated cover letter storage.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CoverLetter, NewCoverLetter};

#[derive(Clone)]
pub struct CoverLetterRepository {
    pool: AsyncDbPool,
}

impl CoverLetterRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_letter: NewCoverLetter) -> AppResult<CoverLetter> {
        use crate::schema::cover_letters::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(cover_letters)
            .values(&new_letter)
            .returning(CoverLetter::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn get(&self, letter_id: i32) -> AppResult<CoverLetter> {
        use crate::schema::cover_letters::dsl::*;
        let mut conn = self.pool.get().await?;

        cover_letters
            .filter(id.eq(letter_id))
            .select(CoverLetter::as_select())
            .first(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "CoverLetter".to_string(),
                    field: "id".to_string(),
                    value: letter_id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    /// Newest first, optionally scoped to one job application.
    pub async fn list(&self, for_job: Option<i32>) -> AppResult<Vec<CoverLetter>> {
        use crate::schema::cover_letters::dsl::*;
        let mut conn = self.pool.get().await?;

        let mut query = cover_letters.into_boxed();
        if let Some(job_id) = for_job {
            query = query.filter(job_application_id.eq(job_id));
        }

        query
            .order(created_at.desc())
            .select(CoverLetter::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Most recent letter for a job application, if any.
    pub async fn latest_for_job(&self, job_id: i32) -> AppResult<Option<CoverLetter>> {
        use crate::schema::cover_letters::dsl::*;
        let mut conn = self.pool.get().await?;

        cover_letters
            .filter(job_application_id.eq(job_id))
            .order(created_at.desc())
            .select(CoverLetter::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
