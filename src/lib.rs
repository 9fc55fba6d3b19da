//! # beryl-common
//!
//! Shared security commons for Beryl backend services: the security
//! policy, password hashing with policy enforcement, and signed expiring
//! tokens. Re-exports the public surface of `beryl-core` and
//! `beryl-security` so services depend on one crate.
//!
//! ## Password hashing
//!
//! ```
//! use beryl_common::{PasswordHasher, SecurityPolicy};
//!
//! let hasher = PasswordHasher::new(SecurityPolicy::default()).unwrap();
//!
//! let hash = hasher.hash_blocking("StrongP@ss1").unwrap();
//! assert!(hasher.verify_blocking("StrongP@ss1", hash.expose()).unwrap());
//! assert!(!hasher.verify_blocking("WrongP@ss1", hash.expose()).unwrap());
//! ```
//!
//! ## Tokens
//!
//! ```
//! use beryl_common::{JwtConfig, SecurityPolicy, TokenManager, TokenType};
//! use serde_json::{Map, Value};
//!
//! let config = JwtConfig {
//!     secret_key: "an example secret that is long enough".to_string(),
//!     algorithm: "HS256".to_string(),
//! };
//! let manager = TokenManager::new(&config, &SecurityPolicy::default()).unwrap();
//!
//! let mut data = Map::new();
//! data.insert("sub".to_string(), Value::from("user-123"));
//!
//! let token = manager.create_token(&data, &TokenType::Access, None).unwrap();
//! let claims = manager.verify_token(&token.value, &TokenType::Access).unwrap();
//! assert_eq!(claims["sub"], "user-123");
//! ```

pub use beryl_core::config::{
    AppConfig, JwtConfig, LoggingConfig, PasswordRule, Pattern, SecurityPolicy,
};
pub use beryl_core::error::{AppError, ErrorKind};
pub use beryl_core::logging;
pub use beryl_core::result::AppResult;

pub use beryl_security::error::{PasswordPolicyError, PolicyViolation, TokenError};
pub use beryl_security::password::{PasswordHash, PasswordHasher, PasswordValidator};
pub use beryl_security::token::{Token, TokenManager, TokenType};
