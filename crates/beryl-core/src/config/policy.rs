//! Security policy thresholds and password rules.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

/// A compiled password rule matcher.
///
/// Wraps [`regex::Regex`] so an invalid pattern is rejected when the policy
/// is built or deserialized, never at match time. Equality and hashing are
/// by pattern source text.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern from its source text.
    pub fn new(source: &str) -> Result<Self, AppError> {
        Regex::new(source).map(Self).map_err(|e| {
            AppError::configuration(format!("Invalid password pattern '{source}': {e}"))
        })
    }

    /// Check whether the pattern matches anywhere in the given text.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    /// Return the pattern source text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Regex::new(&source).map(Self).map_err(D::Error::custom)
    }
}

/// A named password strength rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PasswordRule {
    /// Rule identifier reported in violations (e.g. "uppercase").
    pub name: String,
    /// Matcher the password must satisfy.
    pub pattern: Pattern,
    /// Human-readable message for when the rule fails.
    pub message: String,
}

impl PasswordRule {
    /// Create a rule, compiling its pattern.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        message: impl Into<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            name: name.into(),
            pattern: Pattern::new(pattern)?,
            message: message.into(),
        })
    }
}

/// Security-relevant thresholds shared by all Beryl services.
///
/// Covers password strength, login lockout, token lifetimes, and session
/// limits. A policy is immutable once constructed; services treat it as
/// read-only for the lifetime of the process. Two policies with the same
/// thresholds and rules compare equal and hash equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityPolicy {
    /// Minimum password length in characters.
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
    /// Pattern rules every password must satisfy.
    #[serde(default = "default_password_patterns")]
    pub password_patterns: Vec<PasswordRule>,
    /// Failed login attempts allowed before lockout.
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,
    /// Account lockout duration in minutes.
    #[serde(default = "default_account_lockout_minutes")]
    pub account_lockout_minutes: u64,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: u64,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_token_expire_days")]
    pub refresh_token_expire_days: u64,
    /// Verification token lifetime in hours.
    #[serde(default = "default_verification_token_expire_hours")]
    pub verification_token_expire_hours: u64,
    /// Password reset token lifetime in hours.
    #[serde(default = "default_reset_token_expire_hours")]
    pub reset_token_expire_hours: u64,
    /// Maximum concurrent sessions per user.
    #[serde(default = "default_max_sessions_per_user")]
    pub max_sessions_per_user: u32,
    /// Idle session timeout in minutes.
    #[serde(default = "default_session_idle_timeout_minutes")]
    pub session_idle_timeout_minutes: u64,
}

impl SecurityPolicy {
    /// Check the policy for internally inconsistent values.
    ///
    /// Rejects thresholds that would disable a protection entirely, such as
    /// a zero minimum length or a zero attempt budget.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.password_min_length == 0 {
            return Err(AppError::configuration(
                "password_min_length must be at least 1",
            ));
        }
        if self.max_login_attempts == 0 {
            return Err(AppError::configuration(
                "max_login_attempts must be at least 1",
            ));
        }
        if self.account_lockout_minutes == 0 {
            return Err(AppError::configuration(
                "account_lockout_minutes must be at least 1",
            ));
        }

        let mut seen = HashSet::new();
        for rule in &self.password_patterns {
            if rule.name.is_empty() {
                return Err(AppError::configuration(
                    "password rules must have a non-empty name",
                ));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(AppError::configuration(format!(
                    "duplicate password rule name '{}'",
                    rule.name
                )));
            }
        }

        Ok(())
    }
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min_length(),
            password_patterns: default_password_patterns(),
            max_login_attempts: default_max_login_attempts(),
            account_lockout_minutes: default_account_lockout_minutes(),
            access_token_expire_minutes: default_access_token_expire_minutes(),
            refresh_token_expire_days: default_refresh_token_expire_days(),
            verification_token_expire_hours: default_verification_token_expire_hours(),
            reset_token_expire_hours: default_reset_token_expire_hours(),
            max_sessions_per_user: default_max_sessions_per_user(),
            session_idle_timeout_minutes: default_session_idle_timeout_minutes(),
        }
    }
}

fn default_password_min_length() -> usize {
    8
}

fn default_password_patterns() -> Vec<PasswordRule> {
    vec![
        builtin_rule(
            "uppercase",
            r"[A-Z]",
            "Password must contain at least one uppercase letter",
        ),
        builtin_rule(
            "lowercase",
            r"[a-z]",
            "Password must contain at least one lowercase letter",
        ),
        builtin_rule("digit", r"\d", "Password must contain at least one number"),
        builtin_rule(
            "special",
            r#"[!@#$%^&*(),.?":{}|<>]"#,
            "Password must contain at least one special character",
        ),
    ]
}

fn builtin_rule(name: &str, pattern: &str, message: &str) -> PasswordRule {
    PasswordRule::new(name, pattern, message).expect("built-in password rule is valid")
}

fn default_max_login_attempts() -> u32 {
    5
}

fn default_account_lockout_minutes() -> u64 {
    15
}

fn default_access_token_expire_minutes() -> u64 {
    30
}

fn default_refresh_token_expire_days() -> u64 {
    7
}

fn default_verification_token_expire_hours() -> u64 {
    24
}

fn default_reset_token_expire_hours() -> u64 {
    24
}

fn default_max_sessions_per_user() -> u32 {
    5
}

fn default_session_idle_timeout_minutes() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let policy = SecurityPolicy::default();
        assert_eq!(policy.password_min_length, 8);
        assert_eq!(policy.max_login_attempts, 5);
        assert_eq!(policy.account_lockout_minutes, 15);
        assert_eq!(policy.access_token_expire_minutes, 30);
        assert_eq!(policy.refresh_token_expire_days, 7);
        assert_eq!(policy.verification_token_expire_hours, 24);
        assert_eq!(policy.reset_token_expire_hours, 24);
        assert_eq!(policy.max_sessions_per_user, 5);
        assert_eq!(policy.session_idle_timeout_minutes, 60);
    }

    #[test]
    fn test_default_rules() {
        let policy = SecurityPolicy::default();
        let names: Vec<&str> = policy
            .password_patterns
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["uppercase", "lowercase", "digit", "special"]);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_rule_matching() {
        let policy = SecurityPolicy::default();
        let uppercase = &policy.password_patterns[0];
        assert!(uppercase.pattern.is_match("Abc"));
        assert!(!uppercase.pattern.is_match("abc"));

        let special = &policy.password_patterns[3];
        assert!(special.pattern.is_match("a!b"));
        assert!(!special.pattern.is_match("ab1"));
    }

    #[test]
    fn test_zero_thresholds_rejected() {
        let policy = SecurityPolicy {
            password_min_length: 0,
            ..SecurityPolicy::default()
        };
        assert!(policy.validate().is_err());

        let policy = SecurityPolicy {
            max_login_attempts: 0,
            ..SecurityPolicy::default()
        };
        assert!(policy.validate().is_err());

        let policy = SecurityPolicy {
            account_lockout_minutes: 0,
            ..SecurityPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_duplicate_rule_names_rejected() {
        let mut policy = SecurityPolicy::default();
        let rule = policy.password_patterns[0].clone();
        policy.password_patterns.push(rule);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_equality_and_hash() {
        use std::collections::hash_map::DefaultHasher;

        let a = SecurityPolicy::default();
        let b = SecurityPolicy::default();
        assert_eq!(a, b);

        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());

        let c = SecurityPolicy {
            password_min_length: 12,
            ..SecurityPolicy::default()
        };
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(Pattern::new(r"[unclosed").is_err());
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: SecurityPolicy =
            serde_json::from_str("{}").expect("empty object should deserialize");
        assert_eq!(policy, SecurityPolicy::default());

        let policy: SecurityPolicy =
            serde_json::from_str(r#"{"password_min_length": 12}"#).expect("should deserialize");
        assert_eq!(policy.password_min_length, 12);
        assert_eq!(policy.max_login_attempts, 5);
    }
}
