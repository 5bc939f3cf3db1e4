use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CodeGenerator, GadgetService, RandomCodeGenerator, SeaOrmAuthService,
    SeaOrmGadgetService, TokenIssuer,
};

/// Process-wide handles shared by the HTTP layer and the CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub gadget_service: Arc<dyn GadgetService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::from_parts(config, store, Arc::new(RandomCodeGenerator))
    }

    /// Wires the services over an existing store and code generator.
    pub fn from_parts(
        config: Config,
        store: Store,
        generator: Arc<dyn CodeGenerator>,
    ) -> anyhow::Result<Self> {
        let tokens = TokenIssuer::from_config(&config.auth)?;

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            tokens,
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        let gadget_service =
            Arc::new(SeaOrmGadgetService::new(store.clone(), generator)) as Arc<dyn GadgetService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            auth_service,
            gadget_service,
        })
    }
}
