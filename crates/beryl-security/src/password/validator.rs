//! Password policy enforcement for new passwords.

use beryl_core::config::SecurityPolicy;
use beryl_core::result::AppResult;

use crate::error::{PasswordPolicyError, PolicyViolation};

/// Rule name reported when the minimum-length check fails.
pub const MIN_LENGTH_RULE: &str = "min_length";

/// Validates password strength against a configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    policy: SecurityPolicy,
}

impl PasswordValidator {
    /// Creates a new validator, rejecting an inconsistent policy.
    pub fn new(policy: SecurityPolicy) -> AppResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Validates a password against the minimum length and every pattern rule.
    ///
    /// Returns `Ok(())` if the password meets all requirements, or an error
    /// carrying every violated rule in policy order, length first.
    pub fn validate(&self, password: &str) -> Result<(), PasswordPolicyError> {
        let mut violations = Vec::new();

        // Length is in characters, not bytes.
        if password.chars().count() < self.policy.password_min_length {
            violations.push(PolicyViolation {
                rule: MIN_LENGTH_RULE.to_string(),
                message: format!(
                    "Password must be at least {} characters long",
                    self.policy.password_min_length
                ),
            });
        }

        for rule in &self.policy.password_patterns {
            if !rule.pattern.is_match(password) {
                violations.push(PolicyViolation {
                    rule: rule.name.clone(),
                    message: rule.message.clone(),
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(PasswordPolicyError::new(violations))
        }
    }

    /// The policy this validator enforces.
    pub fn policy(&self) -> &SecurityPolicy {
        &self.policy
    }
}
