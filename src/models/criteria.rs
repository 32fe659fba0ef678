use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Deserialize;

/// Saved search criteria driving source ingestion for one user.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::job_search_criteria)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobSearchCriteria {
    pub id: i32,
    pub user_id: i32,
    pub keywords: String,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub remote_only: bool,
    pub salary_min: Option<String>,
    pub max_results: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::job_search_criteria)]
pub struct NewJobSearchCriteria {
    pub user_id: i32,
    pub keywords: String,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub remote_only: bool,
    pub salary_min: Option<String>,
    pub max_results: i32,
}

#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::job_search_criteria)]
pub struct UpdateJobSearchCriteria {
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub remote_only: Option<bool>,
    pub salary_min: Option<String>,
    pub max_results: Option<i32>,
}
