pub mod app_config;
pub mod config;
pub mod deals;

pub use app_config::{AppConfig, DEFAULT_DEAL_PAGES, DEFAULT_SITE_ORIGIN, DEFAULT_USER_AGENT};
pub use config::{load_app_config, load_app_config_from_env};
pub use deals::{
    ChatId, DealRecord, LINK_UNAVAILABLE, NOT_AVAILABLE, NO_DISCOUNT, UNKNOWN_DURATION,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
