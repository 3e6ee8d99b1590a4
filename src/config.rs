use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationError};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://shop.db?mode=rwc";
const CONFIG_DIR: &str = "config";

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Database connection URL
    #[validate(length(min = 1, message = "database_url must not be empty"))]
    pub database_url: String,

    /// Server host address
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Application environment ("development", "test", "production")
    #[validate(custom = "validate_environment")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Whether to run database migrations on startup
    #[serde(default = "default_true_bool")]
    pub auto_migrate: bool,

    /// DB pool: max connections
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    /// DB pool: min connections
    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,

    /// DB timeouts (seconds)
    #[serde(default = "default_db_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,
    #[serde(default = "default_db_idle_timeout_secs")]
    pub db_idle_timeout_secs: u64,
    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Creates a configuration with default tuning for everything but the
    /// connection, bind address and environment.
    pub fn new(database_url: String, host: String, port: u16, environment: String) -> Self {
        Self {
            database_url,
            host,
            port,
            environment,
            log_level: default_log_level(),
            log_json: false,
            auto_migrate: default_true_bool(),
            db_max_connections: default_db_max_connections(),
            db_min_connections: default_db_min_connections(),
            db_connect_timeout_secs: default_db_connect_timeout_secs(),
            db_idle_timeout_secs: default_db_idle_timeout_secs(),
            db_acquire_timeout_secs: default_db_acquire_timeout_secs(),
        }
    }

    /// Checks if running in development environment
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Gets log level reference
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Default value functions
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_true_bool() -> bool {
    true
}

fn default_db_max_connections() -> u32 {
    10
}
fn default_db_min_connections() -> u32 {
    1
}
fn default_db_connect_timeout_secs() -> u64 {
    30
}
fn default_db_idle_timeout_secs() -> u64 {
    600
}
fn default_db_acquire_timeout_secs() -> u64 {
    8
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

fn validate_environment(environment: &str) -> Result<(), ValidationError> {
    match environment.to_ascii_lowercase().as_str() {
        "development" | "test" | "production" => Ok(()),
        _ => {
            let mut err = ValidationError::new("environment");
            err.message = Some("Must be one of: development, test, production".into());
            Err(err)
        }
    }
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("shop_inventory={},tower_http=debug", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let filter = EnvFilter::new(filter_directive);
    if json {
        let _ = fmt().with_env_filter(filter).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter).try_init();
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Default config (config/default.toml)
/// 3. Environment-specific config (config/{env}.toml)
/// 4. Environment variables (APP__*)
/// 5. `DATABASE_URL` and `PORT`, the values a hosting platform usually injects
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    // Support both RUN_ENV and APP_ENV for selecting config profile
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let port_override = env::var("PORT")
        .ok()
        .and_then(|raw| raw.trim().parse::<i64>().ok());

    let config = Config::builder()
        .set_default("database_url", DEFAULT_DATABASE_URL)?
        .set_default("host", DEFAULT_HOST)?
        .set_default("port", i64::from(DEFAULT_PORT))?
        .set_default("environment", run_env.as_str())?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .set_default("auto_migrate", true)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .set_override_option("database_url", env::var("DATABASE_URL").ok())?
        .set_override_option("port", port_override)?
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}
