// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Lock password hashing.
//!
//! Passwords are never stored; records keep an Argon2id PHC string instead.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};

/// Hashing failed (bad parameters or RNG failure).
#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(String);

pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt, returning a PHC string.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Check `password` against a PHC string. Malformed hashes never verify.
    fn verify(&self, hash: &str, password: &str) -> bool;
}

#[derive(Clone, Debug)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError(e.to_string()))
    }

    fn verify(&self, hash: &str, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            tracing::warn!("stored password hash is malformed");
            return false;
        };
        // Parameters come from the PHC string, so hashes made under older
        // cost settings still verify.
        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::fast_hasher;
    use super::*;

    #[test]
    fn hash_produces_argon2id_phc_string() {
        let hash = fast_hasher().hash("secret").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(!hash.contains("secret"));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = fast_hasher();
        assert_ne!(hasher.hash("secret").unwrap(), hasher.hash("secret").unwrap());
    }

    #[test]
    fn verify_accepts_only_the_original_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash("secret").unwrap();
        assert!(hasher.verify(&hash, "secret"));
        assert!(!hasher.verify(&hash, "Secret"));
        assert!(!hasher.verify(&hash, "secret "));
        assert!(!hasher.verify(&hash, ""));
    }

    #[test]
    fn verify_uses_parameters_from_the_hash() {
        let hash = fast_hasher().hash("secret").unwrap();
        let stronger = Argon2Hasher::new(Params::new(Params::MIN_M_COST * 2, 2, 1, None).unwrap());
        assert!(stronger.verify(&hash, "secret"));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        let hasher = fast_hasher();
        assert!(!hasher.verify("not a hash", "secret"));
        assert!(!hasher.verify("", ""));
    }
}
