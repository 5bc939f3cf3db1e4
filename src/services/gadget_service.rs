//! Domain service for the gadget inventory.

use serde::Serialize;
use thiserror::Error;

use crate::db::{Gadget, StorageFailure};
use crate::domain::GadgetStatus;

#[derive(Debug, Error)]
pub enum GadgetError {
    #[error("Gadget not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid status value")]
    InvalidStatus,

    #[error("Gadget cannot be destroyed. Current status: {0}")]
    CannotDestroy(GadgetStatus),

    #[error("Unable to allocate a unique codename")]
    CodenameExhausted,

    #[error("{0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for GadgetError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for GadgetError {
    fn from(err: anyhow::Error) -> Self {
        match StorageFailure::classify(&err) {
            StorageFailure::Constraint(msg) => Self::Constraint(msg),
            StorageFailure::Database(msg) => Self::Database(msg),
            StorageFailure::Other(msg) => Self::Internal(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GadgetDto {
    pub id: String,
    pub name: String,
    pub codename: String,
    pub description: Option<String>,
    pub status: GadgetStatus,
    pub decommissioned_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Gadget> for GadgetDto {
    fn from(gadget: Gadget) -> Self {
        Self {
            id: gadget.id,
            name: gadget.name,
            codename: gadget.codename,
            description: gadget.description,
            status: gadget.status,
            decommissioned_at: gadget.decommissioned_at,
            created_at: gadget.created_at,
            updated_at: gadget.updated_at,
        }
    }
}

/// A gadget as shown in listings: the stored record plus a freshly rolled
/// mission success probability. Neither extra field is persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedGadget {
    #[serde(flatten)]
    pub gadget: GadgetDto,
    pub success_probability: u8,
    pub status_display: String,
}

impl DecoratedGadget {
    #[must_use]
    pub fn new(gadget: GadgetDto, success_probability: u8) -> Self {
        let status_display = format!(
            "{} - {success_probability}% success probability",
            gadget.codename
        );
        Self {
            gadget,
            success_probability,
            status_display,
        }
    }
}

/// Fields accepted by `update`. Status arrives unparsed so an unknown value
/// can be reported as [`GadgetError::InvalidStatus`].
#[derive(Debug, Clone, Default)]
pub struct GadgetUpdate {
    /// Absent or empty keeps the current name.
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    /// Absent or empty keeps the current status.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecommissionResult {
    pub id: String,
    pub status: GadgetStatus,
    pub decommissioned_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfDestructResult {
    pub id: String,
    pub codename: String,
    pub status: GadgetStatus,
    pub message: String,
    pub confirmation_code: String,
}

#[async_trait::async_trait]
pub trait GadgetService: Send + Sync {
    /// Newest first. A non-empty `status` must name one of the four statuses.
    async fn list(&self, status: Option<&str>) -> Result<Vec<DecoratedGadget>, GadgetError>;

    async fn get(&self, id: &str) -> Result<DecoratedGadget, GadgetError>;

    /// Allocates a unique codename and stores the gadget as `Available`.
    ///
    /// # Errors
    ///
    /// - [`GadgetError::Validation`] if the name is blank
    /// - [`GadgetError::CodenameExhausted`] if no free codename was found
    async fn create(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<GadgetDto, GadgetError>;

    async fn update(&self, id: &str, update: GadgetUpdate) -> Result<GadgetDto, GadgetError>;

    /// Soft delete: the row stays, with status `Decommissioned`.
    async fn decommission(&self, id: &str) -> Result<DecommissionResult, GadgetError>;

    /// Moves a non-terminal gadget to `Destroyed` and hands back a fresh
    /// confirmation code.
    ///
    /// `confirmation_code` is accepted for API compatibility and ignored.
    async fn self_destruct(
        &self,
        id: &str,
        confirmation_code: Option<&str>,
    ) -> Result<SelfDestructResult, GadgetError>;
}
