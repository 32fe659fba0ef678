//! Cover letter DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::CoverLetter;

/// Generates a letter for one tracked job.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateCoverLetterRequest {
    #[schema(example = 42)]
    pub job_id: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CoverLetterQuery {
    /// Restrict to letters for one job
    pub job_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoverLetterResponse {
    pub id: i32,
    pub job_application_id: i32,
    pub content: String,
    /// `llm` or `template`
    #[schema(example = "template")]
    pub generated_by: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<CoverLetter> for CoverLetterResponse {
    fn from(letter: CoverLetter) -> Self {
        Self {
            id: letter.id,
            job_application_id: letter.job_application_id,
            content: letter.content,
            generated_by: letter.generated_by,
            created_at: letter.created_at,
        }
    }
}
