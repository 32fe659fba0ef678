//! User profile repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewUserProfile, UpdateUserProfile, UserProfile};

/// Profile repository holding an async connection pool.
///
/// `AsyncDbPool` (bb8::Pool) uses `Arc` internally, so cloning is cheap.
#[derive(Clone)]
pub struct UserProfileRepository {
    pool: AsyncDbPool,
}

impl UserProfileRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_profile: NewUserProfile) -> AppResult<UserProfile> {
        use crate::schema::user_profiles::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(user_profiles)
            .values(&new_profile)
            .returning(UserProfile::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, profile_id: i32) -> AppResult<Option<UserProfile>> {
        use crate::schema::user_profiles::dsl::*;
        let mut conn = self.pool.get().await?;

        user_profiles
            .filter(id.eq(profile_id))
            .select(UserProfile::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_by_email(&self, profile_email: &str) -> AppResult<Option<UserProfile>> {
        use crate::schema::user_profiles::dsl::*;
        let mut conn = self.pool.get().await?;

        user_profiles
            .filter(email.eq(profile_email))
            .select(UserProfile::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Fetches a profile, mapping absence to `NotFound`.
    pub async fn get(&self, profile_id: i32) -> AppResult<UserProfile> {
        self.find_by_id(profile_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "UserProfile".to_string(),
                field: "id".to_string(),
                value: profile_id.to_string(),
            })
    }

    pub async fn update(
        &self,
        profile_id: i32,
        update_data: UpdateUserProfile,
    ) -> AppResult<UserProfile> {
        use crate::schema::user_profiles::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(user_profiles.filter(id.eq(profile_id)))
            .set(&update_data)
            .returning(UserProfile::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "UserProfile".to_string(),
                    field: "id".to_string(),
                    value: profile_id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    pub async fn touch_last_login(&self, profile_id: i32) -> AppResult<()> {
        use crate::schema::user_profiles::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(user_profiles.filter(id.eq(profile_id)))
            .set(last_login.eq(diesel::dsl::now))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
