//! Domain service for registration, login and token authentication.

use serde::Serialize;
use thiserror::Error;

use crate::db::{StorageFailure, User};
use crate::domain::{Identity, Role};
use crate::services::token::TokenError;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    /// The token verified but its subject no longer exists.
    #[error("Invalid token. User not found.")]
    UserNotFound,

    #[error("{0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        match StorageFailure::classify(&err) {
            StorageFailure::Constraint(msg) => Self::Constraint(msg),
            StorageFailure::Database(msg) => Self::Database(msg),
            StorageFailure::Other(msg) => Self::Internal(msg),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::TokenExpired,
            TokenError::Invalid => Self::InvalidToken,
        }
    }
}

/// Public user fields; the password hash never leaves the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

impl From<Identity> for UserInfo {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            role: identity.role,
        }
    }
}

/// Login result containing the public user fields and a session token.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user: UserInfo,
    pub token: String,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account. Role defaults to [`Role::Agent`].
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] if username or password is blank
    /// - [`AuthError::UsernameTaken`] if the username is already registered
    async fn register(
        &self,
        username: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<UserInfo, AuthError>;

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown username or a
    /// wrong password; the two cases are indistinguishable to the caller.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Verifies a session token and resolves its subject against the store.
    async fn authenticate(&self, token: &str) -> Result<Identity, AuthError>;
}
