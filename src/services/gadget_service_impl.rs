//! `SeaORM` implementation of the `GadgetService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::constants::codename::MAX_ATTEMPTS;
use crate::db::{Gadget, GadgetChanges, Insert, Store};
use crate::domain::GadgetStatus;
use crate::services::gadget_service::{
    DecommissionResult, DecoratedGadget, GadgetDto, GadgetError, GadgetService, GadgetUpdate,
    SelfDestructResult,
};
use crate::services::generator::CodeGenerator;

pub struct SeaOrmGadgetService {
    store: Store,
    generator: Arc<dyn CodeGenerator>,
}

impl SeaOrmGadgetService {
    #[must_use]
    pub fn new(store: Store, generator: Arc<dyn CodeGenerator>) -> Self {
        Self { store, generator }
    }

    fn decorate(&self, gadget: Gadget) -> DecoratedGadget {
        DecoratedGadget::new(gadget.into(), self.generator.success_probability())
    }

    fn parse_status(value: &str) -> Result<GadgetStatus, GadgetError> {
        value.parse().map_err(|_| GadgetError::InvalidStatus)
    }

    async fn find(&self, id: &str) -> Result<Gadget, GadgetError> {
        self.store
            .get_gadget(id)
            .await?
            .ok_or(GadgetError::NotFound)
    }
}

#[async_trait]
impl GadgetService for SeaOrmGadgetService {
    async fn list(&self, status: Option<&str>) -> Result<Vec<DecoratedGadget>, GadgetError> {
        let status = status
            .filter(|s| !s.is_empty())
            .map(Self::parse_status)
            .transpose()?;

        let gadgets = self.store.list_gadgets(status).await?;

        Ok(gadgets.into_iter().map(|g| self.decorate(g)).collect())
    }

    async fn get(&self, id: &str) -> Result<DecoratedGadget, GadgetError> {
        let gadget = self.find(id).await?;
        Ok(self.decorate(gadget))
    }

    async fn create(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<GadgetDto, GadgetError> {
        if name.trim().is_empty() {
            return Err(GadgetError::Validation("Gadget name is required".to_string()));
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let codename = self.generator.codename();

            if self.store.codename_exists(&codename).await? {
                debug!(attempt, codename = %codename, "Codename taken, retrying");
                continue;
            }

            match self
                .store
                .insert_gadget(name, &codename, description.as_deref())
                .await?
            {
                Insert::Created(gadget) => {
                    info!(id = %gadget.id, codename = %gadget.codename, "Gadget created");
                    return Ok(gadget.into());
                }
                Insert::Duplicate => {
                    debug!(attempt, codename = %codename, "Codename claimed concurrently, retrying");
                }
            }
        }

        warn!(attempts = MAX_ATTEMPTS, "Codename space exhausted");
        Err(GadgetError::CodenameExhausted)
    }

    async fn update(&self, id: &str, update: GadgetUpdate) -> Result<GadgetDto, GadgetError> {
        self.find(id).await?;

        let status = update
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(Self::parse_status)
            .transpose()?;

        let changes = GadgetChanges {
            name: update.name.filter(|name| !name.is_empty()),
            description: update.description,
            status,
        };

        let gadget = self
            .store
            .update_gadget(id, changes)
            .await?
            .ok_or(GadgetError::NotFound)?;

        Ok(gadget.into())
    }

    async fn decommission(&self, id: &str) -> Result<DecommissionResult, GadgetError> {
        let gadget = self
            .store
            .decommission_gadget(id)
            .await?
            .ok_or(GadgetError::NotFound)?;

        info!(id = %gadget.id, codename = %gadget.codename, "Gadget decommissioned");

        Ok(DecommissionResult {
            id: gadget.id,
            status: gadget.status,
            decommissioned_at: gadget.decommissioned_at,
        })
    }

    async fn self_destruct(
        &self,
        id: &str,
        _confirmation_code: Option<&str>,
    ) -> Result<SelfDestructResult, GadgetError> {
        let gadget = self.find(id).await?;

        if gadget.status.is_terminal() {
            return Err(GadgetError::CannotDestroy(gadget.status));
        }

        let code = self.generator.self_destruct_code();

        if !self.store.mark_gadget_destroyed(id).await? {
            // Another request moved it to a terminal status first
            let current = self.find(id).await?;
            return Err(GadgetError::CannotDestroy(current.status));
        }

        info!(id = %gadget.id, codename = %gadget.codename, "Gadget self-destructed");

        Ok(SelfDestructResult {
            message: format!("{} has been successfully destroyed.", gadget.codename),
            id: gadget.id,
            codename: gadget.codename,
            status: GadgetStatus::Destroyed,
            confirmation_code: code,
        })
    }
}
