//! Integration tests for Configuration System

use menuflow::config::{ConfigLoader, MenuflowConfig};
use menuflow::error::{ErrorKind, MenuError};
use menuflow::frame::{ActionRow, Control, Frame};
use menuflow::menu::{MenuManager, MenuOptions};
use menuflow::render::MemoryTransport;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_config_file_drives_menu_options() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("menuflow.toml");

    std::fs::write(
        &config_file,
        r#"
[menu]
time_limit_secs = 45
ignore_actions = ["spacer"]
same_user_only = false

[logging]
level = "warn"
format = "json"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert_eq!(config.menu.time_limit().as_secs(), 45);
    assert!(!config.menu.same_user_only);
    assert_eq!(config.logging.format, "json");

    let frame = Frame::text("Main").with_row(ActionRow::new(vec![
        Control::button("spacer", " "),
        Control::button("open", "Open"),
    ]));
    let menu = MenuManager::new(
        Arc::new(MemoryTransport::new()),
        MenuOptions::from_settings(frame, &config.menu),
    );
    assert!(menu.classifier().is_ignored("spacer"));
    assert_eq!(menu.actions().len(), 1);
}

#[test]
fn test_missing_explicit_file_is_a_configuration_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::load(Some(&temp_dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, MenuError::ConfigError(_)));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_invalid_pager_id_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("menuflow.toml");
    std::fs::write(&config_file, "[menu]\ndefault_pager_id = \"main-pager\"\n").unwrap();

    let err = ConfigLoader::load_from_file(&config_file).unwrap_err();
    assert!(err.to_string().contains("default_pager_id"));
}

#[test]
fn test_rendered_toml_loads_back() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("menuflow.toml");
    std::fs::write(&config_file, MenuflowConfig::default().to_toml().unwrap()).unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert_eq!(config, MenuflowConfig::default());
}
