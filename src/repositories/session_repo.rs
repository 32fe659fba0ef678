//! Session, session log and browser session repositories.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    ApplicationLog, ApplicationSession, BrowserSession, NewApplicationLog, NewApplicationSession,
    NewBrowserSession, SessionStatus, UpdateApplicationSession, UpdateBrowserSession,
};

#[derive(Clone)]
pub struct SessionRepository {
    pool: AsyncDbPool,
}

impl SessionRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_session: NewApplicationSession) -> AppResult<ApplicationSession> {
        use crate::schema::application_sessions::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(application_sessions)
            .values(&new_session)
            .returning(ApplicationSession::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn get(&self, session_id: i32) -> AppResult<ApplicationSession> {
        use crate::schema::application_sessions::dsl::*;
        let mut conn = self.pool.get().await?;

        application_sessions
            .filter(id.eq(session_id))
            .select(ApplicationSession::as_select())
            .first(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "ApplicationSession".to_string(),
                    field: "id".to_string(),
                    value: session_id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<ApplicationSession>> {
        use crate::schema::application_sessions::dsl::*;
        let mut conn = self.pool.get().await?;

        application_sessions
            .order(started_at.desc())
            .limit(limit)
            .select(ApplicationSession::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update(
        &self,
        session_id: i32,
        update_data: UpdateApplicationSession,
    ) -> AppResult<ApplicationSession> {
        use crate::schema::application_sessions::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(application_sessions.filter(id.eq(session_id)))
            .set(&update_data)
            .returning(ApplicationSession::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::NotFound {
                    entity: "ApplicationSession".to_string(),
                    field: "id".to_string(),
                    value: session_id.to_string(),
                },
                _ => AppError::from(e),
            })
    }

    /// Closes a session with its final status and counters.
    pub async fn finalize(
        &self,
        session_id: i32,
        final_status: SessionStatus,
        counters: UpdateApplicationSession,
    ) -> AppResult<ApplicationSession> {
        use crate::schema::application_sessions::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(application_sessions.filter(id.eq(session_id)))
            .set((
                &counters,
                status.eq(final_status),
                ended_at.eq(diesel::dsl::now),
            ))
            .returning(ApplicationSession::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn add_log(&self, new_log: NewApplicationLog) -> AppResult<ApplicationLog> {
        use crate::schema::application_logs::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(application_logs)
            .values(&new_log)
            .returning(ApplicationLog::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn logs_for_session(&self, owning_session: i32) -> AppResult<Vec<ApplicationLog>> {
        use crate::schema::application_logs::dsl::*;
        let mut conn = self.pool.get().await?;

        application_logs
            .filter(session_id.eq(owning_session))
            .order(created_at.asc())
            .select(ApplicationLog::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn create_browser_session(
        &self,
        new_browser: NewBrowserSession,
    ) -> AppResult<BrowserSession> {
        use crate::schema::browser_sessions::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(browser_sessions)
            .values(&new_browser)
            .returning(BrowserSession::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update_browser_session(
        &self,
        browser_id: i32,
        update_data: UpdateBrowserSession,
    ) -> AppResult<BrowserSession> {
        use crate::schema::browser_sessions::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(browser_sessions.filter(id.eq(browser_id)))
            .set(&update_data)
            .returning(BrowserSession::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
