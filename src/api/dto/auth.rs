//! Authentication request/response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::profile::ProfileResponse;
use crate::services::TokenPair;

/// Register request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    /// Full name
    #[validate(length(min = 2, max = 120, message = "Name must be between 2 and 120 characters"))]
    #[schema(example = "Asha Rao", min_length = 2, max_length = 120)]
    pub name: String,
    /// Email address (unique)
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "asha@example.com", format = "email")]
    pub email: String,
    /// Password (plain text, will be hashed)
    #[validate(length(min = 8, max = 72, message = "Password must be between 8 and 72 characters"))]
    #[schema(example = "correct-horse-battery", format = "password", min_length = 8, max_length = 72)]
    pub password: String,
    /// Phone number
    #[schema(example = "+91 98765 43210")]
    pub phone: Option<String>,
}

/// Login request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "asha@example.com", format = "email")]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    #[schema(format = "password")]
    pub password: String,
}

/// Refresh token request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token cannot be empty"))]
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
}

/// Issued token pair
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
    #[schema(example = "bearer")]
    pub token_type: &'static str,
    /// Access token lifetime in hours
    #[schema(example = 24)]
    pub expires_in_hours: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "bearer",
            expires_in_hours: pair.expires_in_hours,
        }
    }
}

/// Profile plus tokens, returned on login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub profile: ProfileResponse,
    pub tokens: TokenResponse,
}
