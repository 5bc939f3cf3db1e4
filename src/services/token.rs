//! Signed session tokens (HS256 JWT).

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::AuthConfig;
use crate::domain::{Identity, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
            role: claims.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_hours: i64) -> Result<Self> {
        let ttl = Duration::try_hours(ttl_hours)
            .with_context(|| format!("Token lifetime of {ttl_hours} hours is out of range"))?;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        Self::new(&config.jwt_secret, config.token_ttl_hours)
    }

    pub fn issue(&self, identity: &Identity) -> Result<String> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a token as if it had been created at `issued_at`.
    pub fn issue_at(&self, identity: &Identity, issued_at: DateTime<Utc>) -> Result<String> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .context("Token expiry out of range")?;

        let claims = Claims {
            id: identity.id.clone(),
            username: identity.username.clone(),
            role: identity.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        debug!(user = %identity.username, "Issuing session token");

        encode(&Header::default(), &claims, &self.encoding).context("Failed to sign token")
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: "7d3c1b1e-0000-4000-8000-000000000001".to_string(),
            username: "ethan".to_string(),
            role: Role::Agent,
        }
    }

    #[test]
    fn issue_and_verify() {
        let issuer = TokenIssuer::new("test-secret", 24).unwrap();
        let token = issuer.issue(&identity()).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.id, identity().id);
        assert_eq!(claims.username, "ethan");
        assert_eq!(claims.role, Role::Agent);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn expired_token_is_distinguished() {
        let issuer = TokenIssuer::new("test-secret", 1).unwrap();
        let token = issuer
            .issue_at(&identity(), Utc::now() - Duration::hours(3))
            .unwrap();

        assert_eq!(issuer.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = TokenIssuer::new("secret-one", 1).unwrap().issue(&identity()).unwrap();
        let other = TokenIssuer::new("secret-two", 1).unwrap();

        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn out_of_range_lifetime_is_an_error() {
        assert!(TokenIssuer::new("test-secret", i64::MAX).is_err());
    }

    #[test]
    fn garbage_is_invalid() {
        let issuer = TokenIssuer::new("test-secret", 1).unwrap();
        assert_eq!(issuer.verify("not.a.jwt"), Err(TokenError::Invalid));
        assert_eq!(issuer.verify(""), Err(TokenError::Invalid));
    }
}
