use super::ApiError;
use crate::domain::Role;

/// Missing or empty role falls back to the default role.
pub fn validate_role(role: Option<&str>) -> Result<Option<Role>, ApiError> {
    match role {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            ApiError::validation(format!(
                "Invalid role: {value}. Role must be one of: {}, {}",
                Role::Admin,
                Role::Agent
            ))
        }),
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
#[must_use]
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
