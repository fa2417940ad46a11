//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Numeric precision configuration.
    #[serde(default)]
    pub numeric: NumericConfig,
    /// Rate limiting configuration.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Exchange / rate-resolution configuration.
    #[serde(default)]
    pub exchange: ExchangeConfig,
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

/// Numeric precision configuration for rates and amounts.
///
/// Mirrors the DECIMAL(21, 6) column: at most `integer_digits` digits before
/// the decimal point and at most `scale` digits after it.
#[derive(Debug, Clone, Deserialize)]
pub struct NumericConfig {
    /// Maximum number of fractional digits accepted on input.
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Maximum number of integer digits accepted on input.
    #[serde(default = "default_integer_digits")]
    pub integer_digits: u32,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            integer_digits: default_integer_digits(),
        }
    }
}

fn default_scale() -> u32 {
    6
}

fn default_integer_digits() -> u32 {
    15
}

/// The hard cap on `numeric.scale` imposed by the DECIMAL(21, 6) column.
pub const MAX_SCALE: u32 = 6;

/// The hard cap on `numeric.integer_digits` imposed by the DECIMAL(21, 6) column.
pub const MAX_INTEGER_DIGITS: u32 = 15;

/// Rate limiting configuration for mutating and conversion endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Number of requests allowed per window.
    #[serde(default = "default_times")]
    pub times: u32,
    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            times: default_times(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_times() -> u32 {
    15
}

fn default_window_secs() -> u64 {
    60
}

/// Exchange configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// Reference currency used as the pivot for cross-rate resolution.
    #[serde(default = "default_reference_currency")]
    pub reference_currency: String,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            reference_currency: default_reference_currency(),
        }
    }
}

fn default_reference_currency() -> String {
    "USD".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the numeric
    /// limits exceed what the rate column can store.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KURS").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.numeric.scale > MAX_SCALE {
            return Err(config::ConfigError::Message(format!(
                "numeric.scale must be at most {MAX_SCALE}"
            )));
        }
        if self.numeric.integer_digits > MAX_INTEGER_DIGITS {
            return Err(config::ConfigError::Message(format!(
                "numeric.integer_digits must be at most {MAX_INTEGER_DIGITS}"
            )));
        }
        Ok(())
    }
}
