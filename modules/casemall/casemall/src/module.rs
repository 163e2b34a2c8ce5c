use std::sync::Arc;

use axum::Router;
use casemall_sdk::CasemallClientV1;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::CasemallConfig;
use crate::domain::ports::ImageStore;
use crate::domain::service::AppServices;
use crate::infra::images::FsImageStore;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    SeaCartsRepository, SeaOrdersRepository, SeaProductsRepository, SeaUsersRepository,
};
use crate::local_client::CasemallLocalClient;

/// Concrete `AppServices` wired to the SeaORM repositories.
/// Lives in the composition root so the domain never names infra types.
pub(crate) type ConcreteAppServices = AppServices<
    SeaUsersRepository,
    SeaProductsRepository,
    SeaCartsRepository,
    SeaOrdersRepository,
>;

/// The casemall module: services, in-process client and REST router.
#[derive(Clone)]
pub struct CasemallModule {
    services: Arc<ConcreteAppServices>,
    config: CasemallConfig,
}

impl CasemallModule {
    /// Validate the config and wire repositories, image store and services.
    pub fn init(db: DatabaseConnection, config: CasemallConfig) -> anyhow::Result<Self> {
        info!("Initializing casemall module");
        config.validate()?;
        debug!(
            default_page_size = config.default_page_size,
            max_page_size = config.max_page_size,
            image_dir = %config.image_dir.display(),
            "Loaded casemall config"
        );

        let images: Arc<dyn ImageStore> = Arc::new(FsImageStore::new(
            config.image_dir.clone(),
            &config.image_url_prefix,
            config.max_image_bytes,
        ));

        let services = Arc::new(AppServices::new(
            SeaUsersRepository,
            SeaProductsRepository,
            SeaCartsRepository,
            SeaOrdersRepository,
            images,
            db,
            config.service_config(),
        ));

        Ok(Self { services, config })
    }

    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running casemall database migrations");
        Migrator::up(db, None).await?;
        info!("Casemall database migrations completed successfully");
        Ok(())
    }

    /// In-process client for other modules.
    #[must_use]
    pub fn client(&self) -> Arc<dyn CasemallClientV1> {
        Arc::new(CasemallLocalClient::new(Arc::clone(&self.services)))
    }

    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(Arc::clone(&self.services), &self.config)
    }

    #[must_use]
    pub fn config(&self) -> &CasemallConfig {
        &self.config
    }
}
