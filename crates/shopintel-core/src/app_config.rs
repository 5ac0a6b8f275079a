use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::selectors::{load_selector_config, SelectorConfig};
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Optional YAML override for CSS selectors and well-known subpaths.
    pub selectors_path: Option<PathBuf>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// Pause between successive competitor assemblies.
    pub competitor_delay_ms: u64,
    pub competitors_enabled: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("selectors_path", &self.selectors_path)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("competitor_delay_ms", &self.competitor_delay_ms)
            .field("competitors_enabled", &self.competitors_enabled)
            .finish()
    }
}

impl AppConfig {
    /// Selector configuration from `selectors_path`, or the built-in defaults
    /// when no path is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configured file cannot be read, parsed, or
    /// fails validation.
    pub fn selector_config(&self) -> Result<SelectorConfig, ConfigError> {
        match &self.selectors_path {
            Some(path) => load_selector_config(path),
            None => Ok(SelectorConfig::default()),
        }
    }

    #[must_use]
    pub fn competitor_delay(&self) -> Duration {
        Duration::from_millis(self.competitor_delay_ms)
    }
}
