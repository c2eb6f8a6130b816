//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Chart of accounts source.
    #[serde(default)]
    pub chart: ChartConfig,
    /// Tax penalty constants.
    #[serde(default)]
    pub tax: TaxConfig,
    /// Report generation limits.
    #[serde(default)]
    pub reports: ReportsConfig,
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

/// Chart of accounts configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    /// Path to the JSON chart definition loaded at startup.
    #[serde(default = "default_chart_path")]
    pub path: String,
    /// Deepest level an account may sit at.
    #[serde(default = "default_max_level")]
    pub max_level: u8,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            path: default_chart_path(),
            max_level: default_max_level(),
        }
    }
}

fn default_chart_path() -> String {
    "config/plan_de_cuentas.json".to_string()
}

fn default_max_level() -> u8 {
    8
}

/// Tax penalty configuration.
///
/// Values are decimals; give them as strings in TOML and env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// Value of one UFV in bolivianos.
    #[serde(default = "default_ufv")]
    pub ufv: Decimal,
    /// Simple daily interest rate applied to the unpaid tax.
    #[serde(default = "default_daily_interest_rate")]
    pub daily_interest_rate: Decimal,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            ufv: default_ufv(),
            daily_interest_rate: default_daily_interest_rate(),
        }
    }
}

fn default_ufv() -> Decimal {
    Decimal::new(255, 2)
}

fn default_daily_interest_rate() -> Decimal {
    Decimal::new(164, 6)
}

/// Report generation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// Seconds a single report may run before it is cancelled.
    #[serde(default = "default_report_timeout")]
    pub timeout_secs: u64,
    /// Maximum number of cached reports.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
    /// Time-to-live of a cached report, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_report_timeout(),
            cache_capacity: default_cache_capacity(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_report_timeout() -> u64 {
    30
}

fn default_cache_capacity() -> u64 {
    256
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PARTIDA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
