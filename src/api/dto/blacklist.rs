//! Company blacklist DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{BlacklistEntry, NewBlacklistEntry};

#[derive(Debug, Serialize, ToSchema)]
pub struct BlacklistResponse {
    pub id: i32,
    #[schema(example = "Shady Staffing Inc")]
    pub company_name: String,
    pub reason: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<BlacklistEntry> for BlacklistResponse {
    fn from(entry: BlacklistEntry) -> Self {
        Self {
            id: entry.id,
            company_name: entry.company_name,
            reason: entry.reason,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBlacklistRequest {
    #[validate(length(min = 1, max = 200, message = "Company name is required"))]
    #[schema(example = "Shady Staffing Inc")]
    pub company_name: String,
    pub reason: Option<String>,
}

impl From<CreateBlacklistRequest> for NewBlacklistEntry {
    fn from(req: CreateBlacklistRequest) -> Self {
        Self {
            company_name: req.company_name,
            reason: req.reason,
        }
    }
}
