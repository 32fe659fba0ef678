//! JWT bearer authentication middleware.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{validate_access_token, Claims};

/// Authenticated caller, inserted into request extensions after a
/// successful token check. Handlers extract it with `Extension<AuthUser>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: claims.profile_id()?,
            email: claims.email,
        })
    }
}

/// Validates the `Authorization: Bearer <token>` header and stores the
/// caller in request extensions. Rejects missing, malformed, expired and
/// refresh-typed tokens with 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })?;

    let claims = validate_access_token(token, &state.jwt_config.secret)?;
    let auth_user = AuthUser::try_from(claims)?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::TokenType;

    #[test]
    fn auth_user_from_valid_claims() {
        let claims = Claims {
            sub: "123".to_string(),
            email: "asha@example.com".to_string(),
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        };

        let auth_user = AuthUser::try_from(claims).unwrap();
        assert_eq!(auth_user.user_id, 123);
        assert_eq!(auth_user.email, "asha@example.com");
    }

    #[test]
    fn auth_user_rejects_malformed_subject() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            email: "asha@example.com".to_string(),
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        };

        assert!(AuthUser::try_from(claims).is_err());
    }
}
