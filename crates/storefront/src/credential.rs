//! Session credentials.
//!
//! Tokens are display and state artifacts only: nothing in the storefront
//! verifies them. [`DemoTokenIssuer`] reproduces the mocked token of the demo
//! site; [`SignedTokenIssuer`] mints a real HS256 JWT for deployments that
//! hand tokens to a backend.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use shared::domain::User;
use thiserror::Error;

pub const PLACEHOLDER_SIGNATURE: &str = "demo-signature";
pub const STUDENT_ROLE: &str = "student";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to encode token claims: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to sign token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
    #[error("malformed token: {0}")]
    Malformed(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub roles: Vec<String>,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    fn for_user(user: &User) -> Self {
        Self {
            sub: user.email.clone(),
            roles: vec![STUDENT_ROLE.to_string()],
            iat: Utc::now().timestamp(),
            exp: None,
        }
    }
}

pub trait CredentialIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<String, CredentialError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoTokenIssuer;

#[derive(Serialize)]
struct TokenHeader<'a> {
    alg: &'a str,
    typ: &'a str,
}

impl CredentialIssuer for DemoTokenIssuer {
    fn issue(&self, user: &User) -> Result<String, CredentialError> {
        let header = serde_json::to_vec(&TokenHeader {
            alg: "HS256",
            typ: "JWT",
        })?;
        let claims = serde_json::to_vec(&TokenClaims::for_user(user))?;
        Ok(format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims),
            URL_SAFE_NO_PAD.encode(PLACEHOLDER_SIGNATURE)
        ))
    }
}

#[derive(Debug, Clone)]
pub struct SignedTokenIssuer {
    secret: String,
    ttl_seconds: i64,
}

impl SignedTokenIssuer {
    pub fn new(secret: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds,
        }
    }
}

impl CredentialIssuer for SignedTokenIssuer {
    fn issue(&self, user: &User) -> Result<String, CredentialError> {
        let mut claims = TokenClaims::for_user(user);
        let exp = Utc::now() + Duration::seconds(self.ttl_seconds);
        claims.exp = Some(exp.timestamp());

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }
}

/// Reads the claims segment of a token without checking its signature.
pub fn decode_claims(token: &str) -> Result<TokenClaims, CredentialError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(claims), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(CredentialError::Malformed("expected three segments"));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(claims)
        .map_err(|_| CredentialError::Malformed("claims segment is not base64url"))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
#[path = "tests/credential_tests.rs"]
mod tests;
