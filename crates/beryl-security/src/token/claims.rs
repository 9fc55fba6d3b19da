//! Token type tags and claim keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Claim key holding the expiry timestamp (seconds since epoch).
pub const CLAIM_EXP: &str = "exp";
/// Claim key holding the token type tag.
pub const CLAIM_TYPE: &str = "type";

/// Kind of token being issued or verified.
///
/// The tag is embedded in the signed claims under [`CLAIM_TYPE`] and
/// selects the default lifetime at issuance. Not a closed set: tags
/// outside the built-in ones round-trip as [`TokenType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum TokenType {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived token for obtaining new access tokens.
    Refresh,
    /// Email or account verification token.
    Verification,
    /// Password reset token.
    Reset,
    /// Session-bound token; the session owner supplies the lifetime.
    Session,
    /// Service-defined token type; the lifetime must be supplied explicitly.
    Custom(String),
}

impl TokenType {
    /// The wire tag embedded in the type claim.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
            Self::Verification => "verification",
            Self::Reset => "reset",
            Self::Session => "session",
            Self::Custom(tag) => tag,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for TokenType {
    fn from(tag: &str) -> Self {
        match tag {
            "access" => Self::Access,
            "refresh" => Self::Refresh,
            "verification" => Self::Verification,
            "reset" => Self::Reset,
            "session" => Self::Session,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for TokenType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<TokenType> for String {
    fn from(token_type: TokenType) -> Self {
        token_type.as_str().to_string()
    }
}
