//! Dependency initialization and wiring for the API server.

use std::sync::Arc;
use std::time::Duration;

use hackathon_repository::{
    DatasetRepository, DocumentStore, MongoDocumentStore, MySqlAnalyticsRepository,
    MySqlDatasetRepository, MySqlSubmissionRepository, MySqlWorkshopRepository,
};
use mongodb::options::ClientOptions;
use mongodb::Client;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use tracing::{info, warn};

use super::AppConfig;
use crate::server::state::AppState;

/// Time to wait for a pooled MySQL connection.
const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const MONGO_MAX_POOL_SIZE: u32 = 10;
const MONGO_MIN_POOL_SIZE: u32 = 2;
const MONGO_SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub config: AppConfig,
    /// Router state holding every repository handle.
    pub state: AppState,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// The MySQL pool connects lazily, so an unreachable database does not
    /// prevent startup; the schema is created when it can be. A MongoDB that
    /// does not answer a ping leaves the document store disabled.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(anyhow::Error)` - A repository could not be constructed
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        info!(
            port = config.port,
            db_host = %config.db_host,
            db_port = config.db_port,
            db_name = %config.db_name,
            mongo_host = %config.mongo_host,
            mongo_port = config.mongo_port,
            mongo_db = %config.mongo_db,
            "Initializing dependencies"
        );

        let pool = Self::mysql_pool(&config);

        let dataset = Arc::new(MySqlDatasetRepository::new(pool.clone()).await?);
        let submissions = Arc::new(MySqlSubmissionRepository::new(pool.clone()).await?);
        let workshops = Arc::new(MySqlWorkshopRepository::new(pool.clone()).await?);
        let analytics = Arc::new(MySqlAnalyticsRepository::new(pool).await?);

        let schema_ready = match dataset.ensure_schema().await {
            Ok(()) => {
                info!("MySQL schema ready");
                true
            }
            Err(e) => {
                warn!(error = %e, "MySQL schema not initialized, run the data import once the database is reachable");
                false
            }
        };

        let documents = Self::connect_to_mongo(&config).await;

        let state = AppState::new(dataset, submissions, workshops, analytics, documents);
        if schema_ready {
            state.mark_schema_ready();
        }

        Ok(Self { config, state })
    }

    fn mysql_pool(config: &AppConfig) -> MySqlPool {
        let options = MySqlConnectOptions::new()
            .host(&config.db_host)
            .port(config.db_port)
            .username(&config.db_user)
            .password(&config.db_password)
            .database(&config.db_name);

        MySqlPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(DB_ACQUIRE_TIMEOUT)
            .connect_lazy_with(options)
    }

    /// Connect to MongoDB, returning `None` when it cannot be reached.
    async fn connect_to_mongo(config: &AppConfig) -> Option<Arc<dyn DocumentStore>> {
        match Self::try_connect_mongo(config).await {
            Ok(store) => {
                info!(database = %config.mongo_db, "MongoDB connection established");
                Some(Arc::new(store))
            }
            Err(e) => {
                warn!(
                    mongo_host = %config.mongo_host,
                    error = %e,
                    "Failed to connect to MongoDB, document store endpoints disabled"
                );
                None
            }
        }
    }

    async fn try_connect_mongo(config: &AppConfig) -> anyhow::Result<MongoDocumentStore> {
        let mut options = ClientOptions::parse(config.mongo_uri()).await?;
        options.max_pool_size = Some(MONGO_MAX_POOL_SIZE);
        options.min_pool_size = Some(MONGO_MIN_POOL_SIZE);
        options.server_selection_timeout = Some(MONGO_SERVER_SELECTION_TIMEOUT);

        let client = Client::with_options(options)?;
        let store = MongoDocumentStore::new(&client, &config.mongo_db);
        store.ping().await?;
        Ok(store)
    }
}
