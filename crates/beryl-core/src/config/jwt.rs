//! JSON Web Token signing configuration.

use serde::{Deserialize, Serialize};

/// JWT signing configuration.
///
/// Only symmetric HMAC algorithms are supported. The configured algorithm
/// is authoritative for both signing and verification; token headers are
/// never trusted to select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for HMAC signing.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    /// Signing algorithm: `"HS256"`, `"HS384"`, or `"HS512"`.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            algorithm: default_algorithm(),
        }
    }
}

fn default_secret_key() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_algorithm() -> String {
    "HS256".to_string()
}
