//! Password Service
//!
//! Argon2id password hashing (OWASP recommended) with:
//! - Fresh random salt per hash
//! - Optional pepper
//! - Constant-time verification

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};
use zeroize::Zeroizing;

use crate::config::PasswordConfig;
use crate::error::{AuthError, AuthResult};

/// Password service for hashing and verification
#[derive(Clone)]
pub struct PasswordService {
    config: PasswordConfig,
}

impl PasswordService {
    /// Create a new password service
    pub fn new(config: PasswordConfig) -> Self {
        Self { config }
    }

    /// Hash a password using Argon2id
    pub fn hash_password(&self, password: &str) -> AuthResult<String> {
        // Apply pepper if configured
        let password_with_pepper = if let Some(ref pepper) = self.config.pepper {
            Zeroizing::new(format!("{}{}", password, pepper))
        } else {
            Zeroizing::new(password.to_string())
        };

        let salt = SaltString::generate(&mut OsRng);

        let params = Params::new(
            self.config.memory_cost,
            self.config.time_cost,
            self.config.parallelism,
            Some(self.config.hash_length as usize),
        )
        .map_err(|e| AuthError::Internal(format!("Invalid Argon2 params: {}", e)))?;

        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

        let hash = argon2
            .hash_password(password_with_pepper.as_bytes(), &salt)
            .map_err(|_| AuthError::PasswordHashingFailed)?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    pub fn verify_password(&self, password: &str, hash: &str) -> AuthResult<bool> {
        let password_with_pepper = if let Some(ref pepper) = self.config.pepper {
            Zeroizing::new(format!("{}{}", password, pepper))
        } else {
            Zeroizing::new(password.to_string())
        };

        let parsed_hash =
            PasswordHash::new(hash).map_err(|_| AuthError::PasswordVerificationFailed)?;

        // Verify using constant-time comparison
        let argon2 = Argon2::default();
        match argon2.verify_password(password_with_pepper.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(AuthError::PasswordVerificationFailed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PasswordConfig {
        PasswordConfig {
            // Use lower values for tests to be fast
            memory_cost: 4096,
            time_cost: 1,
            parallelism: 1,
            hash_length: 32,
            pepper: None,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let service = PasswordService::new(test_config());
        let password = "correct horse battery staple";

        let hash = service.hash_password(password).unwrap();
        assert!(hash.starts_with("$argon2id$"));

        // The stored value is never the plaintext
        assert_ne!(hash, password);

        // Correct password should verify
        assert!(service.verify_password(password, &hash).unwrap());

        // Wrong password should not verify
        assert!(!service.verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn test_hash_with_pepper() {
        let mut config = test_config();
        config.pepper = Some("secret-pepper".to_string());
        let service = PasswordService::new(config);

        let password = "correct horse battery staple";
        let hash = service.hash_password(password).unwrap();

        // Should verify with same service (same pepper)
        assert!(service.verify_password(password, &hash).unwrap());

        // Service without pepper should fail
        let service_no_pepper = PasswordService::new(test_config());
        assert!(!service_no_pepper.verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_different_passwords_different_hashes() {
        let service = PasswordService::new(test_config());
        let password = "correct horse battery staple";

        let hash1 = service.hash_password(password).unwrap();
        let hash2 = service.hash_password(password).unwrap();

        // Same password should produce different hashes (different salts)
        assert_ne!(hash1, hash2);

        // Both should still verify
        assert!(service.verify_password(password, &hash1).unwrap());
        assert!(service.verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_verify_garbage_hash() {
        let service = PasswordService::new(test_config());
        assert!(service.verify_password("anything", "not-a-phc-string").is_err());
    }
}
