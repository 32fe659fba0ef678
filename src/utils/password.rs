use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, phc::PasswordHash},
};

use crate::error::{AppError, AppResult};

/// Hash a password using Argon2id
///
/// # Returns
/// * `AppResult<String>` - The PHC-format hash string or an error
pub fn hash_password(password: &str) -> AppResult<String> {
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes())
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to hash password: {}", e),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash
///
/// # Returns
/// * `AppResult<bool>` - True if the password matches
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Stored password hash is malformed: {}", e),
    })?;
    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let hash = hash_password("hunter2_but_longer").expect("Failed to hash password");

        assert!(!hash.is_empty());
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_password_success() {
        let password = "correct horse battery staple";
        let hash = hash_password(password).expect("Failed to hash password");

        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_verify_password_failure() {
        let hash = hash_password("correct horse battery staple").expect("Failed to hash password");

        assert!(!verify_password("incorrect horse", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "correct horse battery staple";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();

        // Different salts produce different hashes
        assert_ne!(hash1, hash2);

        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert!(verify_password("anything", "not-a-phc-hash").is_err());
    }
}
