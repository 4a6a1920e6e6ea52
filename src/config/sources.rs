//! Config sources: user config file, explicit file, environment.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `<config dir>/menuflow/config.toml` for the current platform
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "menuflow").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the user config file if it exists.
pub fn add_global_file(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match global_config_path() {
        Some(path) if path.exists() => {
            builder.add_source(File::from(path).required(false))
        }
        Some(path) => {
            debug!(config_path = %path.display(), "No user configuration file");
            builder
        }
        None => builder,
    }
}

/// Add an explicitly requested config file; it must exist.
pub fn add_explicit_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    Ok(builder.add_source(File::from(path.to_path_buf()).required(true)))
}

/// Add `MENUFLOW__SECTION__KEY` environment overrides.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("MENUFLOW")
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("menu.ignore_actions")
            .try_parsing(true),
    )
}
