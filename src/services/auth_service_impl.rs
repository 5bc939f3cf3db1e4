//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::{Insert, Store};
use crate::domain::{Identity, Role};
use crate::services::auth_service::{AuthError, AuthService, LoginResult, UserInfo};
use crate::services::token::TokenIssuer;

pub struct SeaOrmAuthService {
    store: Store,
    tokens: TokenIssuer,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenIssuer, security: SecurityConfig) -> Self {
        Self {
            store,
            tokens,
            security,
        }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        username: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<UserInfo, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }

        if password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let role = role.unwrap_or_default();
        match self
            .store
            .create_user(username, password, role, &self.security)
            .await?
        {
            Insert::Created(user) => {
                info!(username = %user.username, role = %user.role, "User registered");
                Ok(user.into())
            }
            // Lost a race with a concurrent registration
            Insert::Duplicate => Err(AuthError::UsernameTaken),
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self
            .store
            .verify_user_password(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let identity = Identity {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
        };
        let token = self.tokens.issue(&identity)?;

        Ok(LoginResult {
            user: user.into(),
            token,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.tokens.verify(token)?;

        let user = self
            .store
            .get_user_by_id(&claims.id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(Identity {
            id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}
