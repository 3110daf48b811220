use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id password hasher
///
/// Hashes are PHC strings (`$argon2id$v=19$m=...`) carrying their own salt and
/// parameters, so a hash made under older settings still verifies after the
/// configured costs change.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a hasher with the given cost parameters
    ///
    /// ### Errors
    ///
    /// Returns an error if argon2 rejects the parameters (e.g. memory below 8 KiB per lane)
    #[tracing::instrument]
    pub fn new(params: HashParams) -> Result<Self, argon2::Error> {
        let params = Params::new(params.memory_kib, params.iterations, params.parallelism, None)?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a password with a fresh random salt
    #[tracing::instrument(skip(self, password))]
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Checks a password against a stored hash
    ///
    /// A malformed stored hash counts as a mismatch.
    #[tracing::instrument(skip(self, password, hash))]
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self.argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::new(HashParams { memory_kib: 8, iterations: 1, parallelism: 1 }).unwrap()
    }

    #[test]
    fn test_hash_is_argon2id_phc() {
        let hash = cheap_hasher().hash("password").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$"), "unexpected hash format: {}", hash);
    }

    #[test]
    fn test_hash_uses_fresh_salt() {
        let hasher = cheap_hasher();
        assert_ne!(hasher.hash("password").unwrap(), hasher.hash("password").unwrap());
    }

    #[test]
    fn test_verify_accepts_correct_password() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("password").unwrap();
        assert!(hasher.verify("password", &hash));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("password").unwrap();
        assert!(!hasher.verify("Password", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!cheap_hasher().verify("password", "not-a-hash"));
    }

    #[test]
    fn test_verify_across_parameter_changes() {
        let old = cheap_hasher();
        let hash = old.hash("password").unwrap();
        let new = PasswordHasher::new(HashParams { memory_kib: 16, iterations: 2, parallelism: 1 }).unwrap();
        assert!(new.verify("password", &hash));
    }

    #[test]
    fn test_new_rejects_too_little_memory() {
        let result = PasswordHasher::new(HashParams { memory_kib: 1, iterations: 1, parallelism: 1 });
        assert!(result.is_err());
    }

    #[test]
    fn test_default_params_match_argon2_defaults() {
        let params = HashParams::default();
        assert_eq!(params.memory_kib, 19 * 1024);
        assert_eq!(params.iterations, 2);
        assert_eq!(params.parallelism, 1);
    }
}
