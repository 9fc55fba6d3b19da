//! Argon2id password hashing and verification with policy enforcement.

use std::fmt;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash as PhcHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use beryl_core::config::SecurityPolicy;
use beryl_core::error::{AppError, ErrorKind};
use beryl_core::result::AppResult;

use super::validator::PasswordValidator;

/// An opaque salted password hash in PHC string format.
///
/// The encoded string self-describes the algorithm, parameters, and salt,
/// so verification needs no side channel. `Display` and `Debug` are
/// redacted; persistence code must go through [`PasswordHash::expose`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PasswordHash {
    value: String,
}

impl PasswordHash {
    /// Wraps an encoded hash string. Rejects empty input.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(AppError::validation("Password hash must not be empty"));
        }
        Ok(Self { value })
    }

    /// The raw encoded hash, for persistence only.
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Consumes the wrapper, returning the raw encoded hash.
    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("value", &"********")
            .finish()
    }
}

/// Handles password policy checks, hashing, and verification.
///
/// Hashing uses Argon2id with a fresh random salt per call, so the same
/// password never produces the same hash twice. The digest is deliberately
/// slow; the async methods offload it to the blocking thread pool instead
/// of stalling the async scheduler.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    validator: PasswordValidator,
}

impl PasswordHasher {
    /// Creates a hasher bound to the given policy.
    pub fn new(policy: SecurityPolicy) -> AppResult<Self> {
        Ok(Self {
            validator: PasswordValidator::new(policy)?,
        })
    }

    /// Validates the password against the policy, then hashes it.
    ///
    /// A password that violates the policy fails with a validation error
    /// listing every failed rule; nothing is hashed in that case.
    pub async fn hash(&self, password: &str) -> AppResult<PasswordHash> {
        self.validator.validate(password)?;

        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_digest(&password))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Password hashing task failed", e)
            })?
    }

    /// Synchronous variant of [`hash`](Self::hash) for non-async callers.
    pub fn hash_blocking(&self, password: &str) -> AppResult<PasswordHash> {
        self.validator.validate(password)?;
        hash_digest(password)
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(true)` on a match and `Ok(false)` on a mismatch or a
    /// malformed stored hash. Only unexpected backend failures surface
    /// as errors.
    pub async fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || verify_digest(&password, &hash))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Password verification task failed", e)
            })?
    }

    /// Synchronous variant of [`verify`](Self::verify) for non-async callers.
    pub fn verify_blocking(&self, password: &str, hash: &str) -> AppResult<bool> {
        verify_digest(password, hash)
    }

    /// The validator bound to this hasher.
    pub fn validator(&self) -> &PasswordValidator {
        &self.validator
    }
}

fn hash_digest(password: &str) -> AppResult<PasswordHash> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    PasswordHash::new(hash.to_string())
}

fn verify_digest(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = match PhcHash::new(hash) {
        Ok(parsed) => parsed,
        Err(_) => return Ok(false),
    };

    let argon2 = Argon2::default();
    match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::internal(format!(
            "Password verification failed: {e}"
        ))),
    }
}
