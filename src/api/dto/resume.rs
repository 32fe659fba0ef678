//! Resume upload/parse DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::services::ParsedResume;

#[derive(Debug, Serialize, ToSchema)]
pub struct ResumeParseResponse {
    /// Stored file name under the uploads directory
    #[schema(example = "resume_1.pdf")]
    pub file_name: String,
    pub parsed: ParsedResume,
    /// Whether empty profile fields were backfilled from the parse
    pub profile_updated: bool,
}
