//! Argon2id password hasher implementation.
//!
//! Parameters: m=19456 (19 MiB), t=2, p=1.

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use auditdesk_application::PasswordHasher as PasswordHasherPort;
use auditdesk_core::{AppError, AppResult};

/// Argon2id password hasher producing PHC strings with a fresh salt each time.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates an Argon2id hasher.
    #[must_use]
    pub fn new() -> Self {
        let params = Params::new(19456, 2, 1, None).unwrap_or_else(|_| Params::default());

        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| AppError::Internal(format!("failed to hash password: {error}")))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash).map_err(|error| {
            AppError::Internal(format!("stored password hash is not a PHC string: {error}"))
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(error) => Err(AppError::Internal(format!(
                "password verification failed: {error}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditdesk_application::PasswordHasher as PasswordHasherPort;
    use auditdesk_core::AppResult;

    #[test]
    fn hashes_verify_only_the_original_password() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash_password("admin123")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("admin123", &hash)?);
        assert!(!hasher.verify_password("admin124", &hash)?);
        Ok(())
    }

    #[test]
    fn same_password_gets_distinct_salts() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        assert_ne!(hasher.hash_password("admin123")?, hasher.hash_password("admin123")?);
        Ok(())
    }

    #[test]
    fn plaintext_legacy_value_is_an_error() {
        let hasher = Argon2PasswordHasher::new();
        assert!(matches!(
            hasher.verify_password("admin123", "admin123"),
            Err(AppError::Internal(_))
        ));
    }
}
