use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Products expose at most three option axes.
pub const MAX_OPTION_GROUPS: usize = 3;

/// Per-widget behavior switches.
///
/// Only `resolve_availability_conflict` and `reject_malformed_variants` change
/// what the engine computes; the other two are hints for the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    /// Hide a group from this index onward when it and every later group
    /// offer a single value.
    pub hide_single_options_from_level: Option<usize>,
    /// Move a selection off a value that became unavailable.
    pub resolve_availability_conflict: bool,
    /// Keep sold-out (but orderable) values clickable.
    pub select_sold_out: bool,
    /// Fail loading on a variant whose option count does not match the
    /// declared groups instead of skipping it.
    pub reject_malformed_variants: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            hide_single_options_from_level: None,
            resolve_availability_conflict: true,
            select_sold_out: false,
            reject_malformed_variants: false,
        }
    }
}

/// Load and validate a selector configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_selector_config(path: &Path) -> Result<SelectorConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SelectorFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_selector_config(&content)
}

/// Parse and validate a selector configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text does not parse or fails validation.
pub fn parse_selector_config(content: &str) -> Result<SelectorConfig, ConfigError> {
    let config: SelectorConfig =
        serde_yaml::from_str(content).map_err(ConfigError::SelectorFileParse)?;

    validate_selector_config(&config)?;

    Ok(config)
}

fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    if let Some(level) = config.hide_single_options_from_level {
        if level >= MAX_OPTION_GROUPS {
            return Err(ConfigError::Validation(format!(
                "hide_single_options_from_level {level} is out of range; must be below {MAX_OPTION_GROUPS}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "selector_config_test.rs"]
mod tests;
