//! Account registration, login, token refresh and profile management.

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{NewUserProfile, UpdateUserProfile, UserProfile};
use crate::repositories::UserProfileRepository;
use crate::utils::jwt;
use crate::utils::password::{hash_password, verify_password};

/// Issued access/refresh pair with the access token's lifetime.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in_hours: i64,
}

#[derive(Clone)]
pub struct UserService {
    repo: UserProfileRepository,
    jwt: JwtConfig,
}

impl UserService {
    pub fn new(repo: UserProfileRepository, jwt: JwtConfig) -> Self {
        Self { repo, jwt }
    }

    /// Registers a new account. Email uniqueness is checked up front for a
    /// clean error; the DB unique constraint still backstops races.
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: &str,
        phone: Option<String>,
    ) -> AppResult<UserProfile> {
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Duplicate {
                entity: "UserProfile".to_string(),
                field: "email".to_string(),
                value: email,
            });
        }

        let password_hash = hash_password(password)?;
        self.repo
            .create(NewUserProfile {
                name,
                email,
                password_hash,
                phone,
            })
            .await
    }

    /// Verifies credentials and issues a token pair. A wrong password and
    /// an unknown email produce the same error, so login cannot be used to
    /// probe for accounts.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(UserProfile, TokenPair)> {
        let invalid = || AppError::Unauthorized {
            message: "Invalid email or password".to_string(),
        };

        let profile = self.repo.find_by_email(email).await?.ok_or_else(invalid)?;
        if !profile.is_active {
            return Err(AppError::Forbidden {
                message: "Account is deactivated".to_string(),
            });
        }
        if !verify_password(password, &profile.password_hash)? {
            return Err(invalid());
        }

        self.repo.touch_last_login(profile.id).await?;
        let tokens = self.issue_tokens(profile.id, profile.email.clone())?;
        Ok((profile, tokens))
    }

    /// Exchanges a valid refresh token for a new pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = jwt::validate_refresh_token(refresh_token, &self.jwt.secret)?;
        let profile = self.repo.get(claims.profile_id()?).await?;
        if !profile.is_active {
            return Err(AppError::Forbidden {
                message: "Account is deactivated".to_string(),
            });
        }
        self.issue_tokens(profile.id, profile.email)
    }

    pub async fn get_profile(&self, profile_id: i32) -> AppResult<UserProfile> {
        self.repo.get(profile_id).await
    }

    pub async fn update_profile(
        &self,
        profile_id: i32,
        update_data: UpdateUserProfile,
    ) -> AppResult<UserProfile> {
        self.repo.update(profile_id, update_data).await
    }

    fn issue_tokens(&self, profile_id: i32, email: String) -> AppResult<TokenPair> {
        let (access_token, refresh_token) = jwt::generate_token_pair(
            profile_id,
            email,
            &self.jwt.secret,
            self.jwt.access_token_expiration,
            self.jwt.refresh_token_expiration,
        )?;
        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in_hours: self.jwt.access_token_expiration,
        })
    }
}
