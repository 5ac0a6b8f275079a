pub mod app_config;
pub mod config;
pub mod records;
pub mod selectors;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{BrandContext, ContactDetail, Faq, ImportantLinks, Platform, Product, SocialHandle};
pub use selectors::{load_selector_config, SelectorConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read selector file {path}: {source}")]
    SelectorFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse selector file: {0}")]
    SelectorFileParse(#[from] serde_yaml::Error),

    #[error("selector config validation failed: {0}")]
    Validation(String),
}
