//! Applicant profile DTOs. The password hash never leaves the service
//! layer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{UpdateUserProfile, UserProfile};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    pub phone: Option<String>,
    pub is_active: bool,
    #[schema(example = "Backend Engineer")]
    pub current_title: Option<String>,
    pub experience_years: Option<i32>,
    /// Skills as a JSON string array
    #[schema(value_type = Option<Vec<String>>)]
    pub skills: Option<JsonValue>,
    #[schema(value_type = Option<Vec<String>>)]
    pub preferred_locations: Option<JsonValue>,
    pub salary_expectations: Option<String>,
    pub resume_path: Option<String>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub auto_apply_enabled: bool,
    pub max_applications_per_day: i32,
    #[schema(value_type = Option<Vec<String>>)]
    pub preferred_job_types: Option<JsonValue>,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            phone: profile.phone,
            is_active: profile.is_active,
            current_title: profile.current_title,
            experience_years: profile.experience_years,
            skills: profile.skills,
            preferred_locations: profile.preferred_locations,
            salary_expectations: profile.salary_expectations,
            resume_path: profile.resume_path,
            portfolio_url: profile.portfolio_url,
            linkedin_url: profile.linkedin_url,
            auto_apply_enabled: profile.auto_apply_enabled,
            max_applications_per_day: profile.max_applications_per_day,
            preferred_job_types: profile.preferred_job_types,
            created_at: profile.created_at,
            last_login: profile.last_login,
        }
    }
}

/// Partial profile update.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 120, message = "Name must be between 2 and 120 characters"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    #[validate(length(max = 120, message = "Title too long"))]
    pub current_title: Option<String>,
    #[validate(range(min = 0, max = 60, message = "Experience years must be between 0 and 60"))]
    pub experience_years: Option<i32>,
    #[schema(value_type = Option<Vec<String>>)]
    pub skills: Option<JsonValue>,
    #[schema(value_type = Option<Vec<String>>)]
    pub preferred_locations: Option<JsonValue>,
    pub salary_expectations: Option<String>,
    #[validate(url(message = "Invalid portfolio URL"))]
    pub portfolio_url: Option<String>,
    #[validate(url(message = "Invalid LinkedIn URL"))]
    pub linkedin_url: Option<String>,
}

impl From<UpdateProfileRequest> for UpdateUserProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            phone: req.phone,
            current_title: req.current_title,
            experience_years: req.experience_years,
            skills: req.skills,
            preferred_locations: req.preferred_locations,
            salary_expectations: req.salary_expectations,
            portfolio_url: req.portfolio_url,
            linkedin_url: req.linkedin_url,
            ..Default::default()
        }
    }
}

/// Automation preferences, updated separately from the profile fields.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PreferencesRequest {
    pub auto_apply_enabled: Option<bool>,
    #[validate(range(min = 1, max = 200, message = "Daily cap must be between 1 and 200"))]
    pub max_applications_per_day: Option<i32>,
    #[schema(value_type = Option<Vec<String>>)]
    pub preferred_job_types: Option<JsonValue>,
    #[schema(value_type = Option<Vec<String>>)]
    pub preferred_locations: Option<JsonValue>,
}

impl From<PreferencesRequest> for UpdateUserProfile {
    fn from(req: PreferencesRequest) -> Self {
        Self {
            auto_apply_enabled: req.auto_apply_enabled,
            max_applications_per_day: req.max_applications_per_day,
            preferred_job_types: req.preferred_job_types,
            preferred_locations: req.preferred_locations,
            ..Default::default()
        }
    }
}
