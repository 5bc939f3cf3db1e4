use axum::{
    Extension, Json,
    extract::{Request, State, rejection::JsonRejection},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::validation::{bearer_token, validate_role};
use super::{ApiError, ApiResponse, AppState, LoginRequest, LoginResponse, RegisterRequest, UserEnvelope};
use crate::domain::{Identity, Role};
use crate::services::AuthError;

/// Roles allowed through [`require_admin`].
pub const DEFAULT_ALLOWED_ROLES: &[Role] = &[Role::Admin];

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => Self::ValidationError(msg),
            AuthError::UsernameTaken => Self::ValidationError(err.to_string()),
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::InvalidToken
            | AuthError::UserNotFound => Self::Unauthorized(err.to_string()),
            AuthError::Constraint(msg) => Self::StorageValidation(msg),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Verifies `Authorization: Bearer <token>` and attaches the caller's
/// [`Identity`] to the request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Owned so no borrow of the (non-Sync) request is held across the await
    let token = bearer_token(
        request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
    )
    .map(ToString::to_string);

    let Some(token) = token else {
        return Err(ApiError::unauthorized("Access denied. No token provided."));
    };

    let identity = state.auth_service().authenticate(&token).await?;

    tracing::Span::current().record("user_id", identity.id.as_str());
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Admin-only gate; must run after [`auth_middleware`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    authorize(request.extensions().get::<Identity>(), DEFAULT_ALLOWED_ROLES)?;
    Ok(next.run(request).await)
}

pub fn authorize(identity: Option<&Identity>, allowed_roles: &[Role]) -> Result<(), ApiError> {
    let Some(identity) = identity else {
        return Err(ApiError::unauthorized("Unauthorized. Please authenticate."));
    };

    if !allowed_roles.contains(&identity.role) {
        tracing::warn!(
            user_id = %identity.id,
            role = %identity.role,
            "Rejected request with insufficient role"
        );
        return Err(ApiError::forbidden("Forbidden. Insufficient permissions."));
    }

    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let role = validate_role(payload.role.as_deref())?;

    let user = state
        .auth_service()
        .register(
            payload.username.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
            role,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            UserEnvelope { user },
            "User registered successfully",
        )),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let Json(payload) = payload?;

    let result = state
        .auth_service()
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(
        LoginResponse {
            user: result.user,
            token: result.token,
        },
        "Login successful",
    )))
}

/// GET /api/auth/profile
pub async fn profile(
    Extension(identity): Extension<Identity>,
) -> Json<ApiResponse<UserEnvelope>> {
    Json(ApiResponse::success(
        UserEnvelope {
            user: identity.into(),
        },
        "Profile retrieved successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: "id".to_string(),
            username: "user".to_string(),
            role,
        }
    }

    #[test]
    fn authorize_checks_role_membership() {
        assert!(authorize(Some(&identity(Role::Admin)), DEFAULT_ALLOWED_ROLES).is_ok());

        let err = authorize(Some(&identity(Role::Agent)), DEFAULT_ALLOWED_ROLES).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.message(), "Forbidden. Insufficient permissions.");

        assert!(authorize(Some(&identity(Role::Agent)), &[Role::Admin, Role::Agent]).is_ok());
    }

    #[test]
    fn authorize_without_identity_is_unauthenticated() {
        let err = authorize(None, DEFAULT_ALLOWED_ROLES).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Unauthorized. Please authenticate.");
    }

    #[test]
    fn auth_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(AuthError::UsernameTaken).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AuthError::TokenExpired).message(),
            "Token expired"
        );
        assert_eq!(
            ApiError::from(AuthError::UserNotFound).message(),
            "Invalid token. User not found."
        );
    }
}
