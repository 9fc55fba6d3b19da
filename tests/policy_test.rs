//! Integration tests for policy configuration and loading.

use beryl_common::{
    AppConfig, ErrorKind, PasswordRule, PasswordValidator, SecurityPolicy, TokenManager,
};

#[test]
fn test_load_without_files_yields_defaults() {
    // No config/ directory in the test environment, so every section
    // falls back to its documented defaults.
    let config = AppConfig::load("test").unwrap();

    assert_eq!(config.security, SecurityPolicy::default());
    assert_eq!(config.jwt.algorithm, "HS256");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_loaded_defaults_are_usable() {
    let config = AppConfig::load("test").unwrap();

    let validator = PasswordValidator::new(config.security.clone()).unwrap();
    assert!(validator.validate("StrongP@ss1").is_ok());

    let manager = TokenManager::new(&config.jwt, &config.security).unwrap();
    let token = manager
        .create_token(
            &serde_json::Map::new(),
            &beryl_common::TokenType::Access,
            None,
        )
        .unwrap();
    assert!(!token.is_expired());
}

#[test]
fn test_custom_rule_set() {
    let policy = SecurityPolicy {
        password_min_length: 4,
        password_patterns: vec![
            PasswordRule::new("digit", r"\d", "Password must contain at least one number").unwrap(),
            PasswordRule::new(
                "hyphenated",
                r"-",
                "Password must contain at least one hyphen",
            )
            .unwrap(),
        ],
        ..SecurityPolicy::default()
    };

    let validator = PasswordValidator::new(policy).unwrap();
    assert!(validator.validate("12-34").is_ok());

    let err = validator.validate("abcd").unwrap_err();
    let rules: Vec<&str> = err.rules().collect();
    assert_eq!(rules, vec!["digit", "hyphenated"]);
}

#[test]
fn test_policy_round_trips_through_serde() {
    let policy = SecurityPolicy::default();
    let json = serde_json::to_string(&policy).unwrap();
    let parsed: SecurityPolicy = serde_json::from_str(&json).unwrap();
    assert_eq!(policy, parsed);
}

#[test]
fn test_inconsistent_policy_rejected_at_seams() {
    let broken = SecurityPolicy {
        max_login_attempts: 0,
        ..SecurityPolicy::default()
    };

    let err = PasswordValidator::new(broken.clone()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);

    let err = TokenManager::new(&beryl_common::JwtConfig::default(), &broken).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}
