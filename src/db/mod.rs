use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::{GadgetStatus, Role};

pub mod migrator;
pub mod repositories;

pub use repositories::Insert;
pub use repositories::gadget::{Gadget, GadgetChanges};
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite:")
                .trim_start_matches("//")
                .split('?')
                .next()
                .unwrap_or_default();
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if in_memory {
            // The in-memory database vanishes once no connection holds it
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn gadget_repo(&self) -> repositories::gadget::GadgetRepository {
        repositories::gadget::GadgetRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
        security: &SecurityConfig,
    ) -> Result<Insert<User>> {
        self.user_repo()
            .create(username, password, role, security)
            .await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    // ========================================================================
    // Gadgets
    // ========================================================================

    pub async fn list_gadgets(&self, status: Option<GadgetStatus>) -> Result<Vec<Gadget>> {
        self.gadget_repo().list(status).await
    }

    pub async fn get_gadget(&self, id: &str) -> Result<Option<Gadget>> {
        self.gadget_repo().get(id).await
    }

    pub async fn codename_exists(&self, codename: &str) -> Result<bool> {
        self.gadget_repo().codename_exists(codename).await
    }

    pub async fn insert_gadget(
        &self,
        name: &str,
        codename: &str,
        description: Option<&str>,
    ) -> Result<Insert<Gadget>> {
        self.gadget_repo().insert(name, codename, description).await
    }

    pub async fn update_gadget(&self, id: &str, changes: GadgetChanges) -> Result<Option<Gadget>> {
        self.gadget_repo().update(id, changes).await
    }

    pub async fn decommission_gadget(&self, id: &str) -> Result<Option<Gadget>> {
        self.gadget_repo().decommission(id).await
    }

    pub async fn mark_gadget_destroyed(&self, id: &str) -> Result<bool> {
        self.gadget_repo().mark_destroyed(id).await
    }
}

/// Current time in the fixed-width format used by every timestamp column.
///
/// Microsecond precision with a `Z` suffix keeps string order equal to
/// chronological order, which `ORDER BY created_at` relies on.
#[must_use]
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Coarse classification of a storage failure carried inside an `anyhow::Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageFailure {
    /// Unique/foreign-key style violations: the request conflicts with stored data.
    Constraint(String),
    /// Any other database error.
    Database(String),
    /// Not a database error at all.
    Other(String),
}

impl StorageFailure {
    #[must_use]
    pub fn classify(err: &anyhow::Error) -> Self {
        let Some(db_err) = err.chain().find_map(|e| e.downcast_ref::<DbErr>()) else {
            return Self::Other(err.to_string());
        };

        match db_err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg)) => {
                Self::Constraint(msg)
            }
            _ => Self::Database(db_err.to_string()),
        }
    }
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_fixed_width_utc() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), "2026-01-01T00:00:00.000000Z".len());
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn classify_non_database_errors() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(StorageFailure::classify(&err), StorageFailure::Other("boom".to_string()));
    }

    #[test]
    fn classify_plain_database_errors() {
        let err = anyhow::Error::new(DbErr::Custom("disk full".to_string()));
        assert!(matches!(StorageFailure::classify(&err), StorageFailure::Database(_)));
    }

    #[tokio::test]
    async fn in_memory_store_migrates_and_pings() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        store.ping().await.unwrap();
        assert!(store.list_gadgets(None).await.unwrap().is_empty());
    }
}
