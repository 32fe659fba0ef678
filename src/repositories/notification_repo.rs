//! Per-user notification settings.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewNotificationSettings, NotificationSettings, UpdateNotificationSettings};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: AsyncDbPool,
}

impl NotificationRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn find_for_user(&self, owner_id: i32) -> AppResult<Option<NotificationSettings>> {
        use crate::schema::notification_settings::dsl::*;
        let mut conn = self.pool.get().await?;

        notification_settings
            .filter(user_id.eq(owner_id))
            .select(NotificationSettings::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Updates a user's settings, creating the row on first write.
    pub async fn upsert(
        &self,
        owner_id: i32,
        update_data: UpdateNotificationSettings,
    ) -> AppResult<NotificationSettings> {
        match self.find_for_user(owner_id).await? {
            Some(existing) => self.update_row(existing.id, update_data).await,
            None => {
                self.insert_row(NewNotificationSettings {
                    user_id: owner_id,
                    webhook_url: update_data.webhook_url,
                    notify_on_completion: update_data.notify_on_completion.unwrap_or(true),
                    notify_on_error: update_data.notify_on_error.unwrap_or(true),
                })
                .await
            }
        }
    }

    async fn insert_row(
        &self,
        new_settings: NewNotificationSettings,
    ) -> AppResult<NotificationSettings> {
        use crate::schema::notification_settings::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(notification_settings)
            .values(&new_settings)
            .returning(NotificationSettings::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update_row(
        &self,
        row_id: i32,
        update_data: UpdateNotificationSettings,
    ) -> AppResult<NotificationSettings> {
        use crate::schema::notification_settings::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(notification_settings.filter(id.eq(row_id)))
            .set((&update_data, updated_at.eq(diesel::dsl::now)))
            .returning(NotificationSettings::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
