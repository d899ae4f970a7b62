use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::RetryConfig;
use database::postgres::PostgresConfig;
use domain_inventory::UomClientConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` and `database` libraries
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    /// Startup connection retries
    pub database_retry: RetryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub uom: UomClientConfig,
    /// Apply pending migrations before serving (RUN_MIGRATIONS, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if DATABASE_URL is not set
        let database_retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let uom = UomClientConfig::from_env()?;
        let run_migrations = env_parse("RUN_MIGRATIONS", true)?;

        Ok(Self {
            app: app_info!(),
            database,
            database_retry,
            server,
            environment,
            uom,
            run_migrations,
        })
    }
}
