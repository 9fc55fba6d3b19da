//! # beryl-security
//!
//! Password hashing, password policy enforcement, and token management
//! for Beryl backend services.
//!
//! ## Modules
//!
//! - `password` — policy validation and Argon2id hashing/verification
//! - `token` — signed, expiring token issuance and verification
//! - `error` — typed failures that bridge into the unified error system

pub mod error;
pub mod password;
pub mod token;

pub use error::{PasswordPolicyError, PolicyViolation, TokenError};
pub use password::{PasswordHash, PasswordHasher, PasswordValidator};
pub use token::{Token, TokenManager, TokenType};
