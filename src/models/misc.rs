use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::cover_letters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CoverLetter {
    pub id: i32,
    pub job_application_id: i32,
    pub content: String,
    pub generated_by: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::cover_letters)]
pub struct NewCoverLetter {
    pub job_application_id: i32,
    pub content: String,
    pub generated_by: Option<String>,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::company_blacklist)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlacklistEntry {
    pub id: i32,
    pub company_name: String,
    pub reason: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::company_blacklist)]
pub struct NewBlacklistEntry {
    pub company_name: String,
    pub reason: Option<String>,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::notification_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationSettings {
    pub id: i32,
    pub user_id: i32,
    pub webhook_url: Option<String>,
    pub notify_on_completion: bool,
    pub notify_on_error: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::notification_settings)]
pub struct NewNotificationSettings {
    pub user_id: i32,
    pub webhook_url: Option<String>,
    pub notify_on_completion: bool,
    pub notify_on_error: bool,
}

#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::notification_settings)]
pub struct UpdateNotificationSettings {
    pub webhook_url: Option<String>,
    pub notify_on_completion: Option<bool>,
    pub notify_on_error: Option<bool>,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::analytics_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnalyticsEvent {
    pub id: i64,
    pub user_id: Option<i32>,
    pub event_type: String,
    pub payload: Option<JsonValue>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::analytics_events)]
pub struct NewAnalyticsEvent {
    pub user_id: Option<i32>,
    pub event_type: String,
    pub payload: Option<JsonValue>,
}
