//! Password hashing utilities using Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::CredentialsConfig;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Outcome of checking a plaintext password against stored hash material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The password produces the stored hash
    Match,
    /// The hash is well formed but the password does not match it
    Mismatch,
    /// The stored hash is empty or not a valid PHC string
    Unavailable,
}

impl Verification {
    pub fn is_match(self) -> bool {
        self == Self::Match
    }
}

/// Trait for password hashing operations
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a password with a fresh random salt
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a hash
    fn verify(&self, password: &str, hash: &str) -> Verification;
}

/// Argon2id password hasher with configurable cost
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Create a hasher with the argon2 crate's default cost
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a hasher with explicit cost parameters
    pub fn with_params(
        memory_cost_kib: u32,
        time_cost: u32,
        parallelism: u32,
    ) -> Result<Self, DomainError> {
        let params = Params::new(memory_cost_kib, time_cost, parallelism, None).map_err(|e| {
            DomainError::configuration(format!("Invalid Argon2 parameters: {}", e))
        })?;

        Ok(Self { params })
    }

    pub fn from_config(config: &CredentialsConfig) -> Result<Self, DomainError> {
        Self::with_params(config.memory_cost_kib, config.time_cost, config.parallelism)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::encoding(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Verification {
        if hash.is_empty() {
            return Verification::Unavailable;
        }

        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return Verification::Unavailable,
        };

        // Cost parameters are read from the PHC string, so hashes made under
        // an older configuration still verify.
        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Verification::Match,
            Err(_) => Verification::Mismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> Argon2Hasher {
        Argon2Hasher::with_params(8, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = "hunter2";

        let hash = hasher.hash(password).unwrap();

        assert_eq!(hasher.verify(password, &hash), Verification::Match);
        assert_eq!(hasher.verify("wrong", &hash), Verification::Mismatch);
    }

    #[test]
    fn test_hash_is_unique() {
        let hasher = fast_hasher();
        let password = "hunter2";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        // Hashes should be different due to random salt
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(hasher.verify(password, &hash1).is_match());
        assert!(hasher.verify(password, &hash2).is_match());
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct horse battery staple").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("correct horse"));
    }

    #[test]
    fn test_hash_length_is_independent_of_input() {
        let hasher = fast_hasher();

        let short = hasher.hash("a").unwrap();
        let long = hasher.hash(&"a".repeat(500)).unwrap();
        assert_eq!(short.len(), long.len());
    }

    #[test]
    fn test_verify_invalid_hash_is_unavailable() {
        let hasher = fast_hasher();

        assert_eq!(hasher.verify("password", ""), Verification::Unavailable);
        assert_eq!(
            hasher.verify("password", "invalid_hash_format"),
            Verification::Unavailable
        );
    }

    #[test]
    fn test_verify_uses_cost_from_hash() {
        let old = Argon2Hasher::with_params(8, 1, 1).unwrap();
        let new = Argon2Hasher::with_params(16, 2, 1).unwrap();

        let hash = old.hash("hunter2").unwrap();
        assert!(new.verify("hunter2", &hash).is_match());
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let result = Argon2Hasher::with_params(1, 1, 1);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));

        let result = Argon2Hasher::with_params(8, 0, 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_config() {
        let config = CredentialsConfig {
            memory_cost_kib: 8,
            time_cost: 1,
            parallelism: 1,
        };

        let hasher = Argon2Hasher::from_config(&config).unwrap();
        let hash = hasher.hash("pw").unwrap();
        assert!(hash.contains("m=8,t=1,p=1"));
    }
}
