//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Identity bootstrap configuration.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
///
/// Tokens are issued by the identity service that shares this secret.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for HS256 signatures.
    pub secret: String,
    /// Lifetime of tokens minted by [`crate::JwtService::generate_access_token`].
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: i64,
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

/// Default administrator created on first start.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Email of the seeded administrator.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Initial password of the seeded administrator.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
        }
    }
}

fn default_admin_email() -> String {
    "admin@local.test".to_string()
}

fn default_admin_password() -> String {
    "Admin!23456".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Later sources override earlier ones: `config/default`, then
    /// `config/{RUN_MODE}`, then `BOOKWISE__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BOOKWISE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
