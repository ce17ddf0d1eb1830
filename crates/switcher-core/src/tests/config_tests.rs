//! Tests for configuration loading, defaults and validation

use std::time::Duration;

use crate::Error;
use crate::config::{BindingConfig, Config, Directories, LayoutConfig, TimingConfig};
use switcher_types::{Direction, Keysym, ModifierMask, Sides};
use tempfile::TempDir;

fn expect_invalid(config: &Config, needle: &str) {
    match config.validate() {
        Err(Error::Config(message)) => assert!(
            message.contains(needle),
            "expected {needle:?} in {message:?}"
        ),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.timing.reveal_delay(), Duration::from_millis(150));
    assert_eq!(config.timing.hover_disable(), Duration::from_millis(500));
    assert_eq!(
        config.timing.hover_enter_delay(),
        Duration::from_millis(200)
    );
    assert_eq!(config.timing.thumbnail_delay(), Duration::from_millis(500));
    assert_eq!(config.timing.scroll(), Duration::from_millis(100));
    assert_eq!(config.timing.fade_out(), Duration::from_millis(100));

    assert_eq!(config.layout.icon_sizes, vec![96, 64, 48, 32, 22]);
    assert_eq!(config.layout.item_spacing, 10);
    assert_eq!(config.layout.overlay_padding, Sides::uniform(8));

    assert!(config.thumbnails.enabled);
    assert_eq!(config.thumbnails.max_size, 256);
    assert_eq!(
        config.ignored_modifiers,
        ModifierMask::LOCK | ModifierMask::MOD2
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_bindings() {
    let bindings = Config::default().trigger_bindings().unwrap();

    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings[0].keysym, Keysym::SPACE);
    assert_eq!(bindings[0].modifiers, ModifierMask::SUPER);
    assert_eq!(bindings[0].direction(), Direction::Forward);
    assert_eq!(
        bindings[1].modifiers,
        ModifierMask::SUPER | ModifierMask::SHIFT
    );
    assert_eq!(bindings[1].direction(), Direction::Backward);
}

#[test]
fn test_config_parse_minimal() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_parse_partial() {
    let json = r#"{
        "timing": {"revealDelayMs": 0},
        "layout": {"stripPadding": {"left": 4, "right": 4, "top": 2, "bottom": 2}},
        "thumbnails": {"enabled": false}
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.timing.reveal_delay_ms, 0);
    assert_eq!(config.timing.fade_out_ms, 100);
    assert_eq!(config.layout.strip_padding.horizontal(), 8);
    assert_eq!(config.layout.strip_padding.vertical(), 4);
    assert_eq!(config.layout.item_padding, Sides::uniform(6));
    assert!(!config.thumbnails.enabled);
    assert_eq!(config.thumbnails.max_size, 256);
}

#[test]
fn test_config_parse_bindings() {
    let json = r#"{
        "bindings": [
            {"shortcut": "Alt+Tab"},
            {"shortcut": "Alt+Shift+Tab", "reverse": true}
        ],
        "ignoredModifiers": 0
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    let bindings = config.trigger_bindings().unwrap();

    assert_eq!(bindings[0].keysym, Keysym::TAB);
    assert_eq!(bindings[0].modifiers, ModifierMask::MOD1);
    assert!(!bindings[0].reverse);
    assert!(bindings[1].reverse);
    assert_eq!(config.ignored_modifiers, ModifierMask::EMPTY);
}

#[test]
fn test_config_save_load_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    let mut config = Config::default();
    config.timing.scroll_ms = 250;
    config.layout.icon_sizes = vec![128, 64];
    config.bindings.push(BindingConfig {
        shortcut: "Ctrl+grave".to_string(),
        reverse: false,
    });

    config.save(&path).unwrap();
    let loaded = Config::load(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_config_save_uses_camel_case() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    Config::default().save(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();

    assert!(content.contains("revealDelayMs"));
    assert!(content.contains("thumbnailLabelSpacing"));
    assert!(content.contains("ignoredModifiers"));
    assert!(!content.contains("reveal_delay_ms"));
}

#[test]
fn test_config_load_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load(&temp_dir.path().join("absent.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Config::load(&path), Err(Error::Json(_))));
}

#[test]
fn test_config_load_tolerates_unknown_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{"theme": "dark", "timing": {"scrollMs": 50}}"#).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.timing.scroll_ms, 50);
}

#[test]
fn test_validate_icon_sizes() {
    let mut config = Config::default();

    config.layout.icon_sizes = vec![];
    expect_invalid(&config, "empty");

    config.layout.icon_sizes = vec![64, 0];
    expect_invalid(&config, "positive");

    config.layout.icon_sizes = vec![32, 64];
    expect_invalid(&config, "descending");

    config.layout.icon_sizes = vec![64, 64];
    expect_invalid(&config, "descending");
}

#[test]
fn test_validate_lengths() {
    let mut config = Config::default();
    config.layout.item_spacing = -1;
    expect_invalid(&config, "negative");

    let mut config = Config::default();
    config.layout.separator_width = -2;
    expect_invalid(&config, "negative");

    let mut config = Config::default();
    config.thumbnails.max_size = 0;
    expect_invalid(&config, "maxSize");
}

#[test]
fn test_validate_bindings() {
    let mut config = Config::default();
    config.bindings.clear();
    expect_invalid(&config, "bindings");

    let mut config = Config::default();
    config.bindings[1].shortcut = "Super+Hyperspace".to_string();
    expect_invalid(&config, "Hyperspace");
}

#[test]
fn test_timing_config_default_matches_serde_default() {
    let parsed: TimingConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(parsed, TimingConfig::default());

    let parsed: LayoutConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(parsed, LayoutConfig::default());
}

#[test]
fn test_directories_load_config_from_base() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = Directories::with_base(temp_dir.path().join("switcher"));
    dirs.ensure_exists().unwrap();

    let mut config = Config::default();
    config.thumbnails.max_size = 128;
    config.save(&dirs.config_file).unwrap();

    let loaded = Config::load(&dirs.config_file).unwrap();
    assert_eq!(loaded.thumbnails.max_size, 128);
}
