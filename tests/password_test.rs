//! Integration tests for the password hashing flow.

use beryl_common::{ErrorKind, PasswordHasher, SecurityPolicy};

#[tokio::test]
async fn test_hash_and_verify_round_trip() {
    let hasher = PasswordHasher::new(SecurityPolicy::default()).unwrap();

    let hash = hasher.hash("StrongP@ss1").await.unwrap();
    assert!(hash.expose().starts_with("$argon2"));

    assert!(hasher.verify("StrongP@ss1", hash.expose()).await.unwrap());
    assert!(!hasher.verify("StrongP@ss2", hash.expose()).await.unwrap());
}

#[tokio::test]
async fn test_same_password_hashes_differently() {
    let hasher = PasswordHasher::new(SecurityPolicy::default()).unwrap();

    let first = hasher.hash("StrongP@ss1").await.unwrap();
    let second = hasher.hash("StrongP@ss1").await.unwrap();

    assert_ne!(first.expose(), second.expose());
    assert!(hasher.verify("StrongP@ss1", first.expose()).await.unwrap());
    assert!(hasher.verify("StrongP@ss1", second.expose()).await.unwrap());
}

#[tokio::test]
async fn test_policy_violations_reported_together() {
    let hasher = PasswordHasher::new(SecurityPolicy::default()).unwrap();

    let err = hasher.hash("weak").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // One failed attempt reports every violated rule at once.
    assert!(err.message.contains("at least 8 characters"));
    assert!(err.message.contains("uppercase"));
    assert!(err.message.contains("number"));
    assert!(err.message.contains("special character"));
}

#[tokio::test]
async fn test_stricter_policy_applies() {
    let policy = SecurityPolicy {
        password_min_length: 16,
        ..SecurityPolicy::default()
    };
    let hasher = PasswordHasher::new(policy).unwrap();

    let err = hasher.hash("StrongP@ss1").await.unwrap_err();
    assert!(err.message.contains("at least 16 characters"));

    let hash = hasher.hash("StrongP@ssword123!").await.unwrap();
    assert!(
        hasher
            .verify("StrongP@ssword123!", hash.expose())
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_verify_tolerates_corrupt_stored_hash() {
    let hasher = PasswordHasher::new(SecurityPolicy::default()).unwrap();

    // A corrupt hash can never match, but it must not error either.
    assert!(!hasher.verify("StrongP@ss1", "").await.unwrap());
    assert!(!hasher.verify("StrongP@ss1", "garbage").await.unwrap());
    assert!(
        !hasher
            .verify("StrongP@ss1", "$argon2id$v=19$cut-off")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_concurrent_hashing() {
    let hasher = PasswordHasher::new(SecurityPolicy::default()).unwrap();

    let mut handles = Vec::new();
    for i in 0..4 {
        let hasher = hasher.clone();
        handles.push(tokio::spawn(async move {
            let password = format!("StrongP@ss{i}");
            let hash = hasher.hash(&password).await.unwrap();
            hasher.verify(&password, hash.expose()).await.unwrap()
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}

#[tokio::test]
async fn test_hash_display_is_redacted() {
    let hasher = PasswordHasher::new(SecurityPolicy::default()).unwrap();
    let hash = hasher.hash("StrongP@ss1").await.unwrap();

    assert_eq!(format!("{hash}"), "********");
    assert!(!format!("{hash:?}").contains(hash.expose()));
}
