//! Token issuance and verification.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use beryl_core::config::{JwtConfig, SecurityPolicy};
use beryl_core::error::AppError;
use beryl_core::result::AppResult;

use super::claims::{CLAIM_EXP, CLAIM_TYPE, TokenType};
use crate::error::TokenError;

/// An issued, signed token.
///
/// Immutable value object pairing the encoded token string with its
/// issuance metadata. Two tokens are equal when all fields are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The signed, encoded token string.
    pub value: String,
    /// Expiry timestamp (UTC).
    pub expires_at: DateTime<Utc>,
    /// Type tag embedded in the signed claims.
    pub token_type: TokenType,
    /// Optional caller-attached metadata; informational, never signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Token {
    /// Attaches informational metadata.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Checks whether the token's expiry has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

impl fmt::Display for Token {
    /// Omits the token value so it never leaks through logging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} token (expires {})",
            self.token_type,
            self.expires_at.to_rfc3339()
        )
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.expires_at.hash(state);
        self.token_type.hash(state);
    }
}

/// Issues and verifies signed, expiring tokens.
///
/// Stateless: there is no token store, so verification is purely the
/// signature, expiry, and type check. Revocation is a caller concern.
///
/// The signing algorithm is fixed at construction and is authoritative
/// for verification; the algorithm named in a presented token's header is
/// never trusted.
#[derive(Clone)]
pub struct TokenManager {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Header written into every issued token.
    header: Header,
    /// Validation configuration, pinned to the configured algorithm.
    validation: Validation,
    /// Default lifetimes per built-in token type.
    access_lifetime: Duration,
    refresh_lifetime: Duration,
    verification_lifetime: Duration,
    reset_lifetime: Duration,
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenManager {
    /// Creates a manager from signing configuration and policy lifetimes.
    ///
    /// Rejects an empty secret and any algorithm outside the HMAC family.
    pub fn new(config: &JwtConfig, policy: &SecurityPolicy) -> AppResult<Self> {
        policy.validate()?;

        if config.secret_key.is_empty() {
            return Err(AppError::configuration("JWT secret key must not be empty"));
        }

        let algorithm = parse_algorithm(&config.algorithm)?;

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        // No leeway: a token is rejected as soon as its exp is in the past.
        validation.leeway = 0;
        // Claims are an open map; audience checking is the caller's concern.
        validation.validate_aud = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            header: Header::new(algorithm),
            validation,
            access_lifetime: Duration::minutes(policy.access_token_expire_minutes as i64),
            refresh_lifetime: Duration::days(policy.refresh_token_expire_days as i64),
            verification_lifetime: Duration::hours(policy.verification_token_expire_hours as i64),
            reset_lifetime: Duration::hours(policy.reset_token_expire_hours as i64),
        })
    }

    /// Issues a signed token of the given type.
    ///
    /// The signed claims are the caller's `data` plus the computed `exp`
    /// and `type`; the computed values always win, so expiry and type
    /// cannot be forged through `data`. Without `expires_delta` the policy
    /// default for the type applies. `Session` and `Custom` types have no
    /// default and fail with a validation error unless a delta is given.
    pub fn create_token(
        &self,
        data: &Map<String, Value>,
        token_type: &TokenType,
        expires_delta: Option<Duration>,
    ) -> AppResult<Token> {
        let lifetime = match expires_delta {
            Some(delta) => delta,
            None => self
                .default_lifetime(token_type)
                .ok_or_else(|| TokenError::UnknownType(token_type.as_str().to_string()))?,
        };

        let expires_at = Utc::now() + lifetime;

        let mut claims = data.clone();
        claims.insert(CLAIM_EXP.to_string(), Value::from(expires_at.timestamp()));
        claims.insert(CLAIM_TYPE.to_string(), Value::from(token_type.as_str()));

        let value = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(Token {
            value,
            expires_at,
            token_type: token_type.clone(),
            metadata: None,
        })
    }

    /// Decodes and verifies a token, returning the full claims map.
    ///
    /// Checks, in order: decodability, signature under the configured key
    /// and algorithm, expiry, and that the embedded type claim equals
    /// `expected_type`. Each failure mode maps to its own [`TokenError`]
    /// variant inside the returned error's source.
    pub fn verify_token(
        &self,
        token: &str,
        expected_type: &TokenType,
    ) -> AppResult<Map<String, Value>> {
        let token_data = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        let claims = token_data.claims;

        let actual = claims
            .get(CLAIM_TYPE)
            .and_then(Value::as_str)
            .ok_or_else(|| TokenError::Malformed("missing type claim".to_string()))?;

        if actual != expected_type.as_str() {
            return Err(TokenError::WrongType {
                expected: expected_type.as_str().to_string(),
                actual: actual.to_string(),
            }
            .into());
        }

        Ok(claims)
    }

    fn default_lifetime(&self, token_type: &TokenType) -> Option<Duration> {
        match token_type {
            TokenType::Access => Some(self.access_lifetime),
            TokenType::Refresh => Some(self.refresh_lifetime),
            TokenType::Verification => Some(self.verification_lifetime),
            TokenType::Reset => Some(self.reset_lifetime),
            TokenType::Session | TokenType::Custom(_) => None,
        }
    }
}

fn parse_algorithm(name: &str) -> AppResult<Algorithm> {
    match name {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AppError::configuration(format!(
            "Unsupported JWT algorithm '{other}' (expected HS256, HS384, or HS512)"
        ))),
    }
}
