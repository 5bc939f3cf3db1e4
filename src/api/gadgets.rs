use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, CreateGadgetRequest, ListGadgetsQuery, SelfDestructRequest,
    UpdateGadgetRequest,
};
use crate::services::{
    DecommissionResult, DecoratedGadget, GadgetDto, GadgetError, GadgetUpdate, SelfDestructResult,
};

impl From<GadgetError> for ApiError {
    fn from(err: GadgetError) -> Self {
        match err {
            GadgetError::NotFound => Self::NotFound(err.to_string()),
            GadgetError::Validation(msg) => Self::ValidationError(msg),
            GadgetError::InvalidStatus | GadgetError::CannotDestroy(_) => {
                Self::ValidationError(err.to_string())
            }
            GadgetError::CodenameExhausted => Self::Conflict(err.to_string()),
            GadgetError::Constraint(msg) => Self::StorageValidation(msg),
            GadgetError::Database(msg) => Self::DatabaseError(msg),
            GadgetError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

/// GET /api/gadgets?status=
pub async fn list_gadgets(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListGadgetsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<DecoratedGadget>>>, ApiError> {
    let Query(query) = query?;
    let gadgets = state
        .gadget_service()
        .list(query.status.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(
        gadgets,
        "Gadgets retrieved successfully",
    )))
}

/// GET /api/gadgets/{id}
pub async fn get_gadget(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<DecoratedGadget>>, ApiError> {
    let Path(id) = id?;
    let gadget = state.gadget_service().get(&id).await?;
    Ok(Json(ApiResponse::success(gadget, "Operation successful")))
}

/// POST /api/gadgets
pub async fn create_gadget(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateGadgetRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;

    let gadget: GadgetDto = state
        .gadget_service()
        .create(
            payload.name.as_deref().unwrap_or_default(),
            payload.description,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(gadget, "Gadget created successfully")),
    ))
}

/// PATCH /api/gadgets/{id}
pub async fn update_gadget(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<ApiResponse<GadgetDto>>, ApiError> {
    let Path(id) = id?;
    let payload: UpdateGadgetRequest = optional_json(&body)?;

    let update = GadgetUpdate {
        name: payload.name,
        description: payload.description,
        status: payload.status,
    };

    let gadget = state.gadget_service().update(&id, update).await?;

    Ok(Json(ApiResponse::success(
        gadget,
        "Gadget updated successfully",
    )))
}

/// DELETE /api/gadgets/{id}
pub async fn decommission_gadget(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<DecommissionResult>>, ApiError> {
    let Path(id) = id?;
    let result = state.gadget_service().decommission(&id).await?;

    Ok(Json(ApiResponse::success(
        result,
        "Gadget decommissioned successfully",
    )))
}

/// Parses an optional JSON body; an empty body is treated as `{}`.
fn optional_json<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| ApiError::validation(format!("Invalid JSON body: {e}")))
}

/// POST /api/gadgets/{id}/self-destruct
pub async fn self_destruct_gadget(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<ApiResponse<SelfDestructResult>>, ApiError> {
    let Path(id) = id?;
    let request: SelfDestructRequest = optional_json(&body)?;

    let result = state
        .gadget_service()
        .self_destruct(&id, request.confirmation_code.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(
        result,
        "Self-destruct sequence completed",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GadgetStatus;

    #[test]
    fn gadget_errors_map_to_statuses() {
        let cases = [
            (GadgetError::NotFound, StatusCode::NOT_FOUND, "Gadget not found"),
            (
                GadgetError::InvalidStatus,
                StatusCode::BAD_REQUEST,
                "Invalid status value",
            ),
            (
                GadgetError::CannotDestroy(GadgetStatus::Decommissioned),
                StatusCode::BAD_REQUEST,
                "Gadget cannot be destroyed. Current status: Decommissioned",
            ),
            (
                GadgetError::CodenameExhausted,
                StatusCode::CONFLICT,
                "Unable to allocate a unique codename",
            ),
        ];

        for (err, status, message) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status_code(), status);
            assert_eq!(api.message(), message);
        }
    }

    #[test]
    fn optional_json_accepts_empty_body() {
        let empty: UpdateGadgetRequest = optional_json(&Bytes::from_static(b"  ")).unwrap();
        assert!(empty.name.is_none() && empty.description.is_none() && empty.status.is_none());

        let parsed: UpdateGadgetRequest =
            optional_json(&Bytes::from_static(br#"{"status":"Deployed"}"#)).unwrap();
        assert_eq!(parsed.status.as_deref(), Some("Deployed"));

        let err = optional_json::<UpdateGadgetRequest>(&Bytes::from_static(b"{oops")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failures_keep_their_prefix() {
        let api: ApiError = GadgetError::Database("locked".into()).into();
        assert_eq!(api.message(), "Database Error: locked");

        let api: ApiError = GadgetError::Constraint("UNIQUE constraint failed".into()).into();
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
    }
}
