use crate::config::AppConfig;
use crate::errors::ServiceError;
use metrics::{counter, gauge, histogram};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Type alias for a database connection pool
pub type DbPool = DatabaseConnection;

/// Configuration for database connection
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Minimum number of connections
    pub min_connections: u32,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Idle timeout duration
    pub idle_timeout: Duration,
    /// Acquire connection timeout
    pub acquire_timeout: Duration,
}

impl From<&AppConfig> for DbConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            url: cfg.database_url.clone(),
            max_connections: cfg.db_max_connections,
            min_connections: cfg.db_min_connections,
            connect_timeout: Duration::from_secs(cfg.db_connect_timeout_secs),
            idle_timeout: Duration::from_secs(cfg.db_idle_timeout_secs),
            acquire_timeout: Duration::from_secs(cfg.db_acquire_timeout_secs),
        }
    }
}

/// Establishes a connection pool to the database with custom configuration
///
/// # Errors
/// Returns a `ServiceError` if the connection cannot be established
pub async fn establish_connection_with_config(config: &DbConfig) -> Result<DbPool, ServiceError> {
    debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Configuring database connection"
    );

    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .sqlx_logging(true);

    gauge!("shop_db.max_connections", config.max_connections as f64);

    info!(
        "Connecting to database with max_connections={}",
        config.max_connections
    );

    let db_pool = Database::connect(opt).await.map_err(|e| {
        error!("Database connection failed: {}", e);
        counter!("shop_db.connection_failures", 1);
        ServiceError::db_error(e)
    })?;

    info!("Database connection pool established successfully");
    Ok(db_pool)
}

/// Establish DB pool using AppConfig tuning
pub async fn establish_connection_from_app_config(cfg: &AppConfig) -> Result<DbPool, ServiceError> {
    let db_cfg: DbConfig = cfg.into();
    establish_connection_with_config(&db_cfg).await
}

/// Awaits one store call, recording its latency and failures under `operation`.
pub async fn observe<T, F>(operation: &'static str, call: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, DbErr>>,
{
    let start = Instant::now();
    let result = call.await;
    let elapsed = start.elapsed();
    histogram!("shop_db.operation.duration", elapsed, "operation" => operation);

    match result {
        Ok(value) => {
            debug!(operation, duration = ?elapsed, "Database operation completed");
            Ok(value)
        }
        Err(e) => {
            error!(operation, error = %e, "Database operation failed");
            counter!("shop_db.operation.error", 1, "operation" => operation);
            Err(ServiceError::db_error(e))
        }
    }
}

/// Runs database migrations
///
/// # Errors
/// Returns a `ServiceError` if migrations fail to execute
pub async fn run_migrations(pool: &DbPool) -> Result<(), ServiceError> {
    info!("Running database migrations");
    let start = Instant::now();

    let result = crate::migrator::Migrator::up(pool, None)
        .await
        .map_err(ServiceError::db_error);

    let elapsed = start.elapsed();
    match &result {
        Ok(_) => info!(
            "Database migrations completed successfully in {:?}",
            elapsed
        ),
        Err(e) => error!("Database migrations failed after {:?}: {}", elapsed, e),
    }

    result
}

/// Checks if the database connection is active
pub async fn check_connection(pool: &DbPool) -> Result<(), ServiceError> {
    let start = Instant::now();
    let result = pool.ping().await.map_err(ServiceError::db_error);

    let elapsed = start.elapsed();
    match &result {
        Ok(_) => {
            debug!("Database connection check successful in {:?}", elapsed);
            gauge!("shop_db.connection_latency", elapsed.as_millis() as f64);
        }
        Err(e) => {
            error!(
                "Database connection check failed after {:?}: {}",
                elapsed, e
            );
            counter!("shop_db.connection_failures", 1);
        }
    }

    result
}

/// Closes the database connection pool
pub async fn close_pool(pool: DbPool) -> Result<(), ServiceError> {
    info!("Closing database connection pool");
    pool.close().await.map_err(ServiceError::db_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_config_follows_app_config() {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            3000,
            "test".into(),
        );
        cfg.db_max_connections = 3;
        cfg.db_acquire_timeout_secs = 2;

        let db_cfg = DbConfig::from(&cfg);
        assert_eq!(db_cfg.url, "sqlite::memory:");
        assert_eq!(db_cfg.max_connections, 3);
        assert_eq!(db_cfg.acquire_timeout, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn observe_maps_store_errors() {
        let result: Result<(), ServiceError> =
            observe("test.failure", async { Err(DbErr::Custom("nope".into())) }).await;
        assert!(matches!(result, Err(ServiceError::DatabaseError(_))));

        let value = observe("test.success", async { Ok::<_, DbErr>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
}
