use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token for API authentication (short-lived)
    Access,
    /// Refresh token for obtaining new access tokens (long-lived)
    Refresh,
}

/// JWT Claims structure containing profile information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (profile ID)
    pub sub: String,
    /// Profile email
    pub email: String,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a profile
    pub fn new(profile_id: i32, email: String, token_type: TokenType, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: profile_id.to_string(),
            email,
            token_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Parses the subject back into a profile id.
    pub fn profile_id(&self) -> AppResult<i32> {
        self.sub.parse().map_err(|_| AppError::Unauthorized {
            message: "Invalid token subject".to_string(),
        })
    }
}

/// Generates a JWT token for a profile
///
/// # Returns
/// The encoded JWT token string
pub fn generate_token(
    profile_id: i32,
    email: String,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(profile_id, email, token_type, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Generates both access and refresh tokens
///
/// # Returns
/// A tuple of (access_token, refresh_token)
pub fn generate_token_pair(
    profile_id: i32,
    email: String,
    secret: &str,
    access_expiration_hours: i64,
    refresh_expiration_hours: i64,
) -> AppResult<(String, String)> {
    let access_token = generate_token(
        profile_id,
        email.clone(),
        TokenType::Access,
        secret,
        access_expiration_hours,
    )?;

    let refresh_token = generate_token(
        profile_id,
        email,
        TokenType::Refresh,
        secret,
        refresh_expiration_hours,
    )?;

    Ok((access_token, refresh_token))
}

/// Validates and decodes a JWT token
///
/// # Arguments
/// * `token` - The JWT token string to validate
/// * `secret` - The secret key for verifying the token
/// * `expected_type` - Optional expected token type to validate against
///
/// # Returns
/// The decoded claims if the token is valid
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized {
            message: "Token has expired".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::Unauthorized {
            message: "Invalid token".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::Unauthorized {
            message: "Invalid token signature".to_string(),
        },
        _ => AppError::Unauthorized {
            message: format!("Token validation failed: {}", e),
        },
    })?;

    if let Some(expected) = expected_type {
        if claims.token_type != expected {
            return Err(AppError::Unauthorized {
                message: format!(
                    "Invalid token type: expected {:?}, got {:?}",
                    expected, claims.token_type
                ),
            });
        }
    }

    Ok(claims)
}

/// Validates an access token
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

/// Validates a refresh token
pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "unit_test_secret_key_for_signing_tokens";

    #[test]
    fn test_generate_token() {
        let token = generate_token(
            1,
            "dev@jobpilot.io".to_string(),
            TokenType::Access,
            TEST_SECRET,
            24,
        );

        assert!(token.is_ok());
        let token_str = token.unwrap();
        assert!(!token_str.is_empty());
        assert!(token_str.contains('.'));
    }

    #[test]
    fn test_generate_token_pair() {
        let result = generate_token_pair(1, "dev@jobpilot.io".to_string(), TEST_SECRET, 1, 168);

        assert!(result.is_ok());
        let (access_token, refresh_token) = result.unwrap();
        assert!(!access_token.is_empty());
        assert!(!refresh_token.is_empty());
        assert_ne!(access_token, refresh_token);
    }

    #[test]
    fn test_validate_token_success() {
        let token = generate_token(
            7,
            "dev@jobpilot.io".to_string(),
            TokenType::Access,
            TEST_SECRET,
            24,
        )
        .unwrap();

        let claims = validate_token(&token, TEST_SECRET, None).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "dev@jobpilot.io");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.profile_id().unwrap(), 7);
    }

    #[test]
    fn test_validate_wrong_token_type() {
        let access_token = generate_token(
            1,
            "dev@jobpilot.io".to_string(),
            TokenType::Access,
            TEST_SECRET,
            1,
        )
        .unwrap();

        let result = validate_refresh_token(&access_token, TEST_SECRET);
        assert!(result.is_err());

        if let Err(AppError::Unauthorized { message }) = result {
            assert!(message.contains("Invalid token type"));
        } else {
            panic!("Expected Unauthorized error for wrong token type");
        }
    }

    #[test]
    fn test_validate_token_invalid_secret() {
        let token = generate_token(
            1,
            "dev@jobpilot.io".to_string(),
            TokenType::Access,
            TEST_SECRET,
            24,
        )
        .unwrap();

        let result = validate_token(&token, "wrong_secret", None);
        assert!(result.is_err());

        if let Err(AppError::Unauthorized { message }) = result {
            assert!(message.contains("signature"));
        } else {
            panic!("Expected Unauthorized error");
        }
    }

    #[test]
    fn test_validate_token_invalid_format() {
        let result = validate_token("not.a.token", TEST_SECRET, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token() {
        let token = generate_token(
            1,
            "dev@jobpilot.io".to_string(),
            TokenType::Access,
            TEST_SECRET,
            -1,
        )
        .unwrap();

        let result = validate_token(&token, TEST_SECRET, None);
        assert!(result.is_err());

        if let Err(AppError::Unauthorized { message }) = result {
            assert!(message.contains("expired"));
        } else {
            panic!("Expected Unauthorized error for expired token");
        }
    }

    #[test]
    fn test_token_type_serialization() {
        let claims = Claims::new(1, "dev@jobpilot.io".to_string(), TokenType::Refresh, 168);
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"token_type\":\"refresh\""));
    }
}
