//! Search criteria DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{JobSearchCriteria, NewJobSearchCriteria, UpdateJobSearchCriteria};

#[derive(Debug, Serialize, ToSchema)]
pub struct CriteriaResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "rust developer")]
    pub keywords: String,
    #[schema(example = "Bangalore")]
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub remote_only: bool,
    pub salary_min: Option<String>,
    pub max_results: i32,
    pub created_at: NaiveDateTime,
}

impl From<JobSearchCriteria> for CriteriaResponse {
    fn from(c: JobSearchCriteria) -> Self {
        Self {
            id: c.id,
            keywords: c.keywords,
            location: c.location,
            experience_level: c.experience_level,
            job_type: c.job_type,
            remote_only: c.remote_only,
            salary_min: c.salary_min,
            max_results: c.max_results,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCriteriaRequest {
    #[validate(length(min = 2, max = 200, message = "Keywords must be between 2 and 200 characters"))]
    #[schema(example = "rust developer", min_length = 2, max_length = 200)]
    pub keywords: String,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    #[serde(default)]
    pub remote_only: bool,
    pub salary_min: Option<String>,
    #[validate(range(min = 1, max = 500, message = "Max results must be between 1 and 500"))]
    #[serde(default = "default_max_results")]
    #[schema(example = 50)]
    pub max_results: i32,
}

fn default_max_results() -> i32 {
    50
}

impl CreateCriteriaRequest {
    pub fn into_model(self, owner_id: i32) -> NewJobSearchCriteria {
        NewJobSearchCriteria {
            user_id: owner_id,
            keywords: self.keywords,
            location: self.location,
            experience_level: self.experience_level,
            job_type: self.job_type,
            remote_only: self.remote_only,
            salary_min: self.salary_min,
            max_results: self.max_results,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCriteriaRequest {
    #[validate(length(min = 2, max = 200, message = "Keywords must be between 2 and 200 characters"))]
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub remote_only: Option<bool>,
    pub salary_min: Option<String>,
    #[validate(range(min = 1, max = 500, message = "Max results must be between 1 and 500"))]
    pub max_results: Option<i32>,
}

impl From<UpdateCriteriaRequest> for UpdateJobSearchCriteria {
    fn from(req: UpdateCriteriaRequest) -> Self {
        Self {
            keywords: req.keywords,
            location: req.location,
            experience_level: req.experience_level,
            job_type: req.job_type,
            remote_only: req.remote_only,
            salary_min: req.salary_min,
            max_results: req.max_results,
        }
    }
}
