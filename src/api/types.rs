use axum::http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};

use crate::services::UserInfo;

/// Success envelope: `{success: true, message, data?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Error envelope: `{success: false, message, statusCode}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            success: false,
            message: message.into(),
            status_code: status.as_u16(),
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserInfo,
    pub token: String,
}

// ============================================================================
// Gadgets
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListGadgetsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGadgetRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateGadgetRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Absent keeps the description, `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfDestructRequest {
    #[serde(default)]
    pub confirmation_code: Option<String>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing field (`None`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// System
// ============================================================================

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_null_from_missing() {
        let missing: UpdateGadgetRequest = serde_json::from_str(r#"{"name":"X"}"#).unwrap();
        assert_eq!(missing.description, None);

        let null: UpdateGadgetRequest = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let set: UpdateGadgetRequest =
            serde_json::from_str(r#"{"description":"Hidden blade"}"#).unwrap();
        assert_eq!(set.description, Some(Some("Hidden blade".to_string())));
    }

    #[test]
    fn success_envelope_omits_missing_data() {
        let body = serde_json::to_value(ApiResponse::<()> {
            success: true,
            message: "ok".to_string(),
            data: None,
        })
        .unwrap();
        assert!(body.get("data").is_none());

        let body = serde_json::to_value(ApiResponse::success(1, "done")).unwrap();
        assert_eq!(body["data"], 1);
        assert_eq!(body["message"], "done");
    }

    #[test]
    fn self_destruct_request_reads_camel_case() {
        let req: SelfDestructRequest =
            serde_json::from_str(r#"{"confirmationCode":"ABC234"}"#).unwrap();
        assert_eq!(req.confirmation_code.as_deref(), Some("ABC234"));
    }
}
