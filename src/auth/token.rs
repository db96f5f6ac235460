//! # Session Tokens
//!
//! Tokens carry `{email, username, exp}`. Two encodings are supported:
//!
//! - `encoded`: standard base64 of the JSON claims with an ISO-8601 `exp`.
//!   Not signed; anyone can mint one.
//! - `jwt`: HS256 JSON Web Token with a numeric `exp`.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::{AuthError, AuthResult};

/// Claims bundled into a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub email: String,
    pub username: String,
    pub exp: DateTime<Utc>,
}

impl TokenClaims {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now
    }
}

/// Token encoding selected by configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScheme {
    #[default]
    Encoded,
    Jwt,
}

/// Turns claims into an opaque token and back
pub trait TokenCodec: Send + Sync + std::fmt::Debug {
    fn issue(&self, claims: &TokenClaims) -> AuthResult<String>;

    /// Decode a token; expiry is checked by the caller
    fn decode(&self, token: &str) -> AuthResult<TokenClaims>;
}

/// Build the codec for a scheme
pub fn codec_for(scheme: TokenScheme, secret: &str) -> Arc<dyn TokenCodec> {
    match scheme {
        TokenScheme::Encoded => Arc::new(EncodedClaimCodec),
        TokenScheme::Jwt => Arc::new(JwtCodec::new(secret)),
    }
}

/// Unsigned base64 JSON claims
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodedClaimCodec;

impl TokenCodec for EncodedClaimCodec {
    fn issue(&self, claims: &TokenClaims) -> AuthResult<String> {
        let json = serde_json::to_vec(claims).map_err(|_| AuthError::TokenGenerationFailed)?;
        Ok(base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            json,
        ))
    }

    fn decode(&self, token: &str) -> AuthResult<TokenClaims> {
        let json = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, token)
            .map_err(|_| AuthError::MalformedToken)?;
        serde_json::from_slice(&json).map_err(|_| AuthError::MalformedToken)
    }
}

/// Wire form of JWT claims; `exp` must be numeric for validation
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    sub: String,
    username: String,
    exp: i64,
}

/// HS256 JSON Web Tokens
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec").finish_non_exhaustive()
    }
}

impl JwtCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl TokenCodec for JwtCodec {
    fn issue(&self, claims: &TokenClaims) -> AuthResult<String> {
        let wire = JwtClaims {
            sub: claims.email.clone(),
            username: claims.username.clone(),
            exp: claims.exp.timestamp(),
        };
        encode(&Header::default(), &wire, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    fn decode(&self, token: &str) -> AuthResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            }
        })?;

        let exp = Utc
            .timestamp_opt(data.claims.exp, 0)
            .single()
            .ok_or(AuthError::MalformedToken)?;

        Ok(TokenClaims {
            email: data.claims.sub,
            username: data.claims.username,
            exp,
        })
    }
}
