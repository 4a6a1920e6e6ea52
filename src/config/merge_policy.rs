//! Merge rules: defaults applied before any source.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("menu.time_limit_secs", 120)?
        .set_default("menu.default_pager_id", crate::menu::DEFAULT_PAGER_ID)?
        .set_default("menu.same_user_only", true)?
        .set_default("logging.level", "info")
}
