//! Configuration System
//!
//! Layered configuration for menus and logging. Sources, lowest precedence first:
//! built-in defaults, the user config file, an explicit config file, and
//! `MENUFLOW__SECTION__KEY` environment variables.

use crate::error::MenuError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

mod merge_policy;
mod sources;

pub use sources::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuflowConfig {
    /// Menu behaviour
    #[serde(default)]
    pub menu: MenuSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Menu behaviour settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSettings {
    /// Seconds an activation collector stays open
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: u64,

    /// Activation ids that never count as navigation
    #[serde(default)]
    pub ignore_actions: Vec<String>,

    /// Pager id used when none is given
    #[serde(default = "default_pager_id")]
    pub default_pager_id: String,

    /// Only accept activations from the user who opened the menu
    #[serde(default = "default_true")]
    pub same_user_only: bool,
}

fn default_time_limit_secs() -> u64 {
    120
}

fn default_pager_id() -> String {
    crate::menu::DEFAULT_PAGER_ID.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit_secs(),
            ignore_actions: Vec::new(),
            default_pager_id: default_pager_id(),
            same_user_only: default_true(),
        }
    }
}

impl MenuSettings {
    pub fn time_limit(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.time_limit_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.time_limit_secs == 0 {
            return Err("time_limit_secs must be greater than zero".to_string());
        }
        if self.default_pager_id.is_empty() {
            return Err("default_pager_id cannot be empty".to_string());
        }
        if self.default_pager_id.contains('-') {
            return Err(format!(
                "default_pager_id '{}' cannot contain '-'",
                self.default_pager_id
            ));
        }
        Ok(())
    }
}

impl MenuflowConfig {
    pub fn validate(&self) -> Result<(), MenuError> {
        self.menu
            .validate()
            .map_err(|e| MenuError::ConfigError(format!("menu: {}", e)))
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, MenuError> {
        toml::to_string_pretty(self)
            .map_err(|e| MenuError::ConfigError(format!("Failed to render config: {}", e)))
    }
}

/// Loads [`MenuflowConfig`] from all sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the user config file, `explicit` (required when given) and
    /// the environment, then validate.
    pub fn load(explicit: Option<&Path>) -> Result<MenuflowConfig, MenuError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = sources::add_global_file(builder);
        if let Some(path) = explicit {
            builder = sources::add_explicit_file(builder, path)?;
        }
        builder = sources::add_environment(builder);

        let config: MenuflowConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(
            time_limit_secs = config.menu.time_limit_secs,
            ignored = config.menu.ignore_actions.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load a single file on top of the defaults, ignoring other sources
    pub fn load_from_file(path: &Path) -> Result<MenuflowConfig, MenuError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = sources::add_explicit_file(builder, path)?;
        let config: MenuflowConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
