//! Password value object - Domain layer password handling.
//!
//! Encapsulates Argon2id hashing, verification and the needs-rehash
//! signal behind a single value object so no other layer touches raw
//! hash strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Outcome of verifying a plaintext password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerdict {
    /// Password matches and the hash uses current parameters.
    Match,
    /// Password matches but the hash was produced with outdated
    /// parameters; callers should re-hash and persist.
    MatchNeedsRehash,
    /// Password does not match, or the stored hash is malformed.
    Mismatch,
}

impl PasswordVerdict {
    /// True for either match variant.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match | Self::MatchNeedsRehash)
    }
}

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// Enforces the stored-password policy (minimum length); use
    /// [`Password::rehash`] for plaintexts that already authenticated.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.len() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        Self::rehash(plain_text)
    }

    /// Hash a plaintext without applying the length policy.
    ///
    /// Used on the rehash-on-verify path: the plaintext was accepted
    /// when the account was created, possibly under an older policy.
    pub fn rehash(plain_text: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// Never errors: a stored hash that cannot be parsed reports
    /// [`PasswordVerdict::Mismatch`].
    pub fn verify(&self, plain_text: &str) -> PasswordVerdict {
        let parsed = match PasswordHash::new(&self.hash) {
            Ok(parsed) => parsed,
            Err(_) => return PasswordVerdict::Mismatch,
        };

        if Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_err()
        {
            return PasswordVerdict::Mismatch;
        }

        if Self::needs_rehash(&parsed) {
            PasswordVerdict::MatchNeedsRehash
        } else {
            PasswordVerdict::Match
        }
    }

    /// Check whether a parsed hash was produced with outdated parameters.
    ///
    /// Compares algorithm, version and the m/t/p cost parameters against
    /// the current defaults. Output length is ignored: a freshly
    /// generated hash records an explicit length that `Params::default()`
    /// leaves unset.
    fn needs_rehash(parsed: &PasswordHash<'_>) -> bool {
        if Algorithm::try_from(parsed.algorithm) != Ok(Algorithm::Argon2id) {
            return true;
        }

        if parsed.version != Some(Version::V0x13.into()) {
            return true;
        }

        let current = Params::default();
        match Params::try_from(parsed) {
            Ok(params) => {
                params.m_cost() != current.m_cost()
                    || params.t_cost() != current.t_cost()
                    || params.p_cost() != current.p_cost()
            }
            Err(_) => true,
        }
    }

    /// Get Argon2 instance with default config.
    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    fn weak_params_hash(plain: &str) -> String {
        // Deliberately low cost parameters to simulate a legacy hash.
        let params = Params::new(4096, 1, 1, None).unwrap();
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        argon2
            .hash_password(plain.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert_eq!(password.verify(plain), PasswordVerdict::Match);
        assert_eq!(
            password.verify("WrongPassword123"),
            PasswordVerdict::Mismatch
        );
    }

    #[test]
    fn test_verify_is_idempotent() {
        let plain = "RepeatMe12345";
        let password = Password::new(plain).unwrap();

        for _ in 0..3 {
            assert_eq!(password.verify(plain), PasswordVerdict::Match);
        }
    }

    #[test]
    fn test_restored_hash_verifies() {
        let plain = "TestPassword123";
        let password = Password::new(plain).unwrap();
        let hash = password.as_str().to_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain).is_match());
    }

    #[test]
    fn test_malformed_hash_reports_mismatch() {
        let password = Password::from_hash("not-a-valid-phc-string".to_string());
        assert_eq!(password.verify("anything"), PasswordVerdict::Mismatch);

        let empty = Password::from_hash(String::new());
        assert_eq!(empty.verify("anything"), PasswordVerdict::Mismatch);
    }

    #[test]
    fn test_outdated_params_need_rehash() {
        let plain = "LegacyPassword1";
        let password = Password::from_hash(weak_params_hash(plain));

        assert_eq!(password.verify(plain), PasswordVerdict::MatchNeedsRehash);
        // Wrong password on a legacy hash is still just a mismatch.
        assert_eq!(password.verify("wrong"), PasswordVerdict::Mismatch);
    }

    #[test]
    fn test_rehash_clears_needs_rehash() {
        let plain = "LegacyPassword1";
        let rehashed = Password::rehash(plain).unwrap();
        assert_eq!(rehashed.verify(plain), PasswordVerdict::Match);
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        // Different salts produce different hashes
        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain).is_match());
        assert!(pass2.verify(plain).is_match());
    }

    #[test]
    fn test_password_policy_minimum_length() {
        assert!(Password::new("short").is_err());
        assert!(Password::new("12345678").is_ok());
        // Rehash path skips the policy on purpose.
        assert!(Password::rehash("short").is_ok());
    }
}
