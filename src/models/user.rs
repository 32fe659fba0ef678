use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Applicant profile model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub current_title: Option<String>,
    pub experience_years: Option<i32>,
    pub skills: Option<JsonValue>,
    pub preferred_locations: Option<JsonValue>,
    pub salary_expectations: Option<String>,
    pub resume_path: Option<String>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub auto_apply_enabled: bool,
    pub max_applications_per_day: i32,
    pub preferred_job_types: Option<JsonValue>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

impl UserProfile {
    /// Skills as a plain string list, tolerating a missing or malformed column.
    pub fn skill_list(&self) -> Vec<String> {
        match &self.skills {
            Some(JsonValue::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// NewUserProfile model for inserting new records
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::user_profiles)]
pub struct NewUserProfile {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
}

/// UpdateUserProfile model for partial updates
/// Derives AsChangeset for UPDATE operations with optional fields
#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::user_profiles)]
pub struct UpdateUserProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub current_title: Option<String>,
    pub experience_years: Option<i32>,
    pub skills: Option<JsonValue>,
    pub preferred_locations: Option<JsonValue>,
    pub salary_expectations: Option<String>,
    pub resume_path: Option<String>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub auto_apply_enabled: Option<bool>,
    pub max_applications_per_day: Option<i32>,
    pub preferred_job_types: Option<JsonValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_with_skills(skills: Option<JsonValue>) -> UserProfile {
        UserProfile {
            id: 1,
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: None,
            password_hash: "x".into(),
            is_active: true,
            current_title: None,
            experience_years: None,
            skills,
            preferred_locations: None,
            salary_expectations: None,
            resume_path: None,
            portfolio_url: None,
            linkedin_url: None,
            auto_apply_enabled: false,
            max_applications_per_day: 10,
            preferred_job_types: None,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
            last_login: None,
        }
    }

    #[test]
    fn skill_list_reads_string_array() {
        let p = profile_with_skills(Some(json!(["rust", "python"])));
        assert_eq!(p.skill_list(), vec!["rust".to_string(), "python".to_string()]);
    }

    #[test]
    fn skill_list_tolerates_missing_and_malformed() {
        assert!(profile_with_skills(None).skill_list().is_empty());
        assert!(profile_with_skills(Some(json!({"a": 1}))).skill_list().is_empty());
        let mixed = profile_with_skills(Some(json!(["rust", 42])));
        assert_eq!(mixed.skill_list(), vec!["rust".to_string()]);
    }
}
