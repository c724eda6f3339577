pub mod app_config;
pub mod config;
pub mod selector_config;
pub mod variant;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use selector_config::{
    load_selector_config, parse_selector_config, SelectorConfig, MAX_OPTION_GROUPS,
};
pub use variant::{Variant, VariantInput};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read selector config at {path}: {source}")]
    SelectorFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse selector config: {0}")]
    SelectorFileParse(#[source] serde_yaml::Error),

    #[error("selector config validation failed: {0}")]
    Validation(String),
}
