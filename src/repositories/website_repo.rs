//! Website automation configuration repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewWebsiteConfiguration, UpdateWebsiteConfiguration, WebsiteConfiguration};

#[derive(Clone)]
pub struct WebsiteRepository {
    pool: AsyncDbPool,
}

impl WebsiteRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<WebsiteConfiguration>> {
        use crate::schema::website_configurations::dsl::*;
        let mut conn = self.pool.get().await?;

        website_configurations
            .order(display_name.asc())
            .select(WebsiteConfiguration::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_enabled(&self) -> AppResult<Vec<WebsiteConfiguration>> {
        use crate::schema::website_configurations::dsl::*;
        let mut conn = self.pool.get().await?;

        website_configurations
            .filter(enabled.eq(true))
            .order(display_name.asc())
            .select(WebsiteConfiguration::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_site_key(&self, key: &str) -> AppResult<Option<WebsiteConfiguration>> {
        use crate::schema::website_configurations::dsl::*;
        let mut conn = self.pool.get().await?;

        website_configurations
            .filter(site_key.eq(key))
            .select(WebsiteConfiguration::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Fetches a configuration by site key, mapping absence to `NotFound`.
    pub async fn get_by_site_key(&self, key: &str) -> AppResult<WebsiteConfiguration> {
        self.find_by_site_key(key)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "WebsiteConfiguration".to_string(),
                field: "site_key".to_string(),
                value: key.to_string(),
            })
    }

    pub async fn create(
        &self,
        new_config: NewWebsiteConfiguration,
    ) -> AppResult<WebsiteConfiguration> {
        use crate::schema::website_configurations::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(website_configurations)
            .values(&new_config)
            .returning(WebsiteConfiguration::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update(
        &self,
        key: &str,
        update_data: UpdateWebsiteConfiguration,
    ) -> AppResult<WebsiteConfiguration> {
        use crate::schema::website_configurations::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(website_configurations.filter(site_key.eq(key)))
            .set((&update_data, updated_at.eq(diesel::dsl::now)))
            .returning(WebsiteConfiguration::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "WebsiteConfiguration".to_string(),
                    field: "site_key".to_string(),
                    value: key.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        use crate::schema::website_configurations::dsl::*;
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(website_configurations.filter(site_key.eq(key)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        if deleted == 0 {
            return Err(AppError::NotFound {
                entity: "WebsiteConfiguration".to_string(),
                field: "site_key".to_string(),
                value: key.to_string(),
            });
        }
        Ok(())
    }
}
