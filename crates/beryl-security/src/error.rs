//! Typed errors for the security crate.
//!
//! Each failure mode gets its own variant so callers can branch on the
//! outcome. Every type converts into [`AppError`] for propagation through
//! the unified boundary; the typed value is preserved as the source.

use thiserror::Error;

use beryl_core::error::{AppError, ErrorKind};

/// A single failed password rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyViolation {
    /// Name of the violated rule (`"min_length"`, `"uppercase"`, ...).
    pub rule: String,
    /// Human-readable failure message from the policy.
    pub message: String,
}

/// Password rejected by the security policy.
///
/// Carries every violated rule in policy order, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Password does not meet the security policy: {}", violations.iter().map(|v| v.message.as_str()).collect::<Vec<_>>().join("; "))]
pub struct PasswordPolicyError {
    /// All violated rules, in policy order.
    pub violations: Vec<PolicyViolation>,
}

impl PasswordPolicyError {
    /// Create a policy error from the collected violations.
    pub fn new(violations: Vec<PolicyViolation>) -> Self {
        Self { violations }
    }

    /// Names of the violated rules, in policy order.
    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.rule.as_str())
    }
}

impl From<PasswordPolicyError> for AppError {
    fn from(err: PasswordPolicyError) -> Self {
        let message = err.to_string();
        AppError::with_source(ErrorKind::Validation, message, err)
    }
}

/// Token issuance or verification failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The string could not be decoded as a token at all.
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// The signature does not verify under the configured key and algorithm.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The embedded expiry is in the past.
    #[error("Token has expired")]
    Expired,

    /// The embedded type claim does not match the expected type.
    #[error("Invalid token type: expected '{expected}', got '{actual}'")]
    WrongType {
        /// The type the caller asked for.
        expected: String,
        /// The type embedded in the token.
        actual: String,
    },

    /// The token type has no default lifetime and no explicit expiry was given.
    #[error("Invalid token type '{0}': no default lifetime, an explicit expiry is required")]
    UnknownType(String),

    /// Signing failed; indicates a key or claims encoding problem.
    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl TokenError {
    /// The unified error kind this failure maps to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Signing(_) => ErrorKind::Internal,
            _ => ErrorKind::Validation,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::with_source(kind, message, err)
    }
}
