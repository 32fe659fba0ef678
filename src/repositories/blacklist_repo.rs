//! Company blacklist repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{BlacklistEntry, NewBlacklistEntry};

#[derive(Clone)]
pub struct BlacklistRepository {
    pool: AsyncDbPool,
}

impl BlacklistRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<BlacklistEntry>> {
        use crate::schema::company_blacklist::dsl::*;
        let mut conn = self.pool.get().await?;

        company_blacklist
            .order(company_name.asc())
            .select(BlacklistEntry::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn create(&self, new_entry: NewBlacklistEntry) -> AppResult<BlacklistEntry> {
        use crate::schema::company_blacklist::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(company_blacklist)
            .values(&new_entry)
            .returning(BlacklistEntry::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn delete(&self, entry_id: i32) -> AppResult<()> {
        use crate::schema::company_blacklist::dsl::*;
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(company_blacklist.filter(id.eq(entry_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        if deleted == 0 {
            return Err(AppError::NotFound {
                entity: "BlacklistEntry".to_string(),
                field: "id".to_string(),
                value: entry_id.to_string(),
            });
        }
        Ok(())
    }

    /// Case-insensitive membership test used as the pre-application gate.
    pub async fn contains(&self, company: &str) -> AppResult<bool> {
        use crate::schema::company_blacklist::dsl::*;
        let mut conn = self.pool.get().await?;

        let count: i64 = company_blacklist
            .filter(company_name.ilike(company))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)?;
        Ok(count > 0)
    }
}
