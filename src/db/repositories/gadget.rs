use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

use super::Insert;
use crate::db::{is_unique_violation, timestamp_now};
use crate::domain::GadgetStatus;
use crate::entities::{gadgets, prelude::Gadgets};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gadget {
    pub id: String,
    pub name: String,
    pub codename: String,
    pub description: Option<String>,
    pub status: GadgetStatus,
    pub decommissioned_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<gadgets::Model> for Gadget {
    type Error = anyhow::Error;

    fn try_from(model: gadgets::Model) -> Result<Self> {
        let status = model
            .status
            .parse()
            .with_context(|| format!("Corrupt status stored for gadget {}", model.id))?;

        Ok(Self {
            id: model.id,
            name: model.name,
            codename: model.codename,
            description: model.description,
            status,
            decommissioned_at: model.decommissioned_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Partial update of the mutable gadget fields. `None` leaves a field as is;
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GadgetChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<GadgetStatus>,
}

pub struct GadgetRepository {
    conn: DatabaseConnection,
}

impl GadgetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Newest first, optionally restricted to one status.
    pub async fn list(&self, status: Option<GadgetStatus>) -> Result<Vec<Gadget>> {
        let mut query = Gadgets::find();
        if let Some(status) = status {
            query = query.filter(gadgets::Column::Status.eq(status.as_str()));
        }

        let rows = query
            .order_by_desc(gadgets::Column::CreatedAt)
            .order_by_desc(gadgets::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list gadgets")?;

        rows.into_iter().map(Gadget::try_from).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Gadget>> {
        let row = Gadgets::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query gadget by ID")?;

        row.map(Gadget::try_from).transpose()
    }

    pub async fn codename_exists(&self, codename: &str) -> Result<bool> {
        let count = Gadgets::find()
            .filter(gadgets::Column::Codename.eq(codename))
            .count(&self.conn)
            .await
            .context("Failed to check codename")?;

        Ok(count > 0)
    }

    /// Inserts a new `Available` gadget. A codename clash is reported as
    /// [`Insert::Duplicate`] so the caller can pick another one.
    pub async fn insert(
        &self,
        name: &str,
        codename: &str,
        description: Option<&str>,
    ) -> Result<Insert<Gadget>> {
        let now = timestamp_now();
        let active = gadgets::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            codename: Set(codename.to_string()),
            description: Set(description.map(ToString::to_string)),
            status: Set(GadgetStatus::Available.as_str().to_string()),
            decommissioned_at: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        match active.insert(&self.conn).await {
            Ok(model) => Ok(Insert::Created(Gadget::try_from(model)?)),
            Err(e) if is_unique_violation(&e) => Ok(Insert::Duplicate),
            Err(e) => Err(anyhow::Error::new(e).context("Failed to insert gadget")),
        }
    }

    /// Applies `changes` and bumps `updated_at`. Returns `None` when the id is unknown.
    pub async fn update(&self, id: &str, changes: GadgetChanges) -> Result<Option<Gadget>> {
        let Some(model) = Gadgets::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query gadget for update")?
        else {
            return Ok(None);
        };

        let mut active: gadgets::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        active.updated_at = Set(timestamp_now());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update gadget")?;

        Ok(Some(Gadget::try_from(updated)?))
    }

    /// Sets status to `Decommissioned` and stamps `decommissioned_at`.
    /// Repeating the call on an already decommissioned gadget refreshes the stamp.
    pub async fn decommission(&self, id: &str) -> Result<Option<Gadget>> {
        let Some(model) = Gadgets::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query gadget for decommission")?
        else {
            return Ok(None);
        };

        let now = timestamp_now();
        let mut active: gadgets::ActiveModel = model.into();
        active.status = Set(GadgetStatus::Decommissioned.as_str().to_string());
        active.decommissioned_at = Set(Some(now.clone()));
        active.updated_at = Set(now);

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to decommission gadget")?;

        Ok(Some(Gadget::try_from(updated)?))
    }

    /// Moves a non-terminal gadget to `Destroyed` in a single conditional
    /// statement. Returns `false` when nothing changed, either because the id
    /// is unknown or because the gadget already reached a terminal status.
    pub async fn mark_destroyed(&self, id: &str) -> Result<bool> {
        let terminal: Vec<&str> = GadgetStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .map(GadgetStatus::as_str)
            .collect();

        let result = Gadgets::update_many()
            .col_expr(
                gadgets::Column::Status,
                Expr::value(GadgetStatus::Destroyed.as_str()),
            )
            .col_expr(gadgets::Column::UpdatedAt, Expr::value(timestamp_now()))
            .filter(gadgets::Column::Id.eq(id))
            .filter(gadgets::Column::Status.is_not_in(terminal))
            .exec(&self.conn)
            .await
            .context("Failed to mark gadget destroyed")?;

        Ok(result.rows_affected == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    async fn repo() -> GadgetRepository {
        let store = Store::new("sqlite::memory:").await.unwrap();
        GadgetRepository::new(store.conn)
    }

    async fn insert(repo: &GadgetRepository, name: &str, codename: &str) -> Gadget {
        match repo.insert(name, codename, None).await.unwrap() {
            Insert::Created(gadget) => gadget,
            Insert::Duplicate => panic!("unexpected duplicate codename {codename}"),
        }
    }

    #[tokio::test]
    async fn insert_defaults_to_available() {
        let repo = repo().await;
        let gadget = insert(&repo, "Laser Watch", "The Silent Falcon").await;

        assert_eq!(gadget.status, GadgetStatus::Available);
        assert_eq!(gadget.created_at, gadget.updated_at);
        assert!(gadget.decommissioned_at.is_none());
        assert!(repo.codename_exists("The Silent Falcon").await.unwrap());
        assert!(!repo.codename_exists("The Loud Falcon").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_codename_is_reported() {
        let repo = repo().await;
        insert(&repo, "A", "The Iron Viper").await;

        let second = repo.insert("B", "The Iron Viper", None).await.unwrap();
        assert_eq!(second, Insert::Duplicate);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filters_by_status() {
        let repo = repo().await;
        let first = insert(&repo, "First", "The Amber Hawk").await;
        let second = insert(&repo, "Second", "The Bronze Hawk").await;
        repo.update(
            &first.id,
            GadgetChanges {
                status: Some(GadgetStatus::Deployed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);

        let deployed = repo.list(Some(GadgetStatus::Deployed)).await.unwrap();
        assert_eq!(deployed.len(), 1);
        assert_eq!(deployed[0].id, first.id);
    }

    #[tokio::test]
    async fn update_can_clear_description() {
        let repo = repo().await;
        let Insert::Created(gadget) = repo
            .insert("Pen", "The Crimson Pen", Some("Writes"))
            .await
            .unwrap()
        else {
            panic!("expected insert");
        };

        let updated = repo
            .update(
                &gadget.id,
                GadgetChanges {
                    description: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.description, None);
        assert_eq!(updated.name, "Pen");
        assert_eq!(updated.codename, "The Crimson Pen");

        assert!(repo.update("missing", GadgetChanges::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mark_destroyed_only_once() {
        let repo = repo().await;
        let gadget = insert(&repo, "Hook", "The Quiet Owl").await;

        assert!(repo.mark_destroyed(&gadget.id).await.unwrap());
        assert!(!repo.mark_destroyed(&gadget.id).await.unwrap());
        assert!(!repo.mark_destroyed("missing").await.unwrap());

        let stored = repo.get(&gadget.id).await.unwrap().unwrap();
        assert_eq!(stored.status, GadgetStatus::Destroyed);
    }

    #[tokio::test]
    async fn decommission_stamps_time() {
        let repo = repo().await;
        let gadget = insert(&repo, "Car", "The Rapid Fox").await;

        let decommissioned = repo.decommission(&gadget.id).await.unwrap().unwrap();
        assert_eq!(decommissioned.status, GadgetStatus::Decommissioned);
        assert!(decommissioned.decommissioned_at.is_some());

        // Decommissioned gadgets cannot be destroyed
        assert!(!repo.mark_destroyed(&gadget.id).await.unwrap());
    }
}
