use std::path::{Path, PathBuf};

use sklog::SklogError;
use sklog::config::Config;
use sklog::views::SortKey;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/configs")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).unwrap()
}

#[test]
fn test_default_fixture_matches_builtin_defaults() {
    let config = Config::from_toml_str(&read_fixture("default.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_custom_fixture_overrides_fields() {
    let config = Config::from_toml_str(&read_fixture("custom.toml")).unwrap();
    assert_eq!(config.display.default_sort, SortKey::Level);
    assert_eq!(config.display.timeline_limit, 10);
    assert_eq!(config.categories.defaults, ["Systems", "Embedded"]);
    assert_eq!(config.timer.focus_minutes, 50);
    assert_eq!(config.timer.long_break_every, 2);
    assert_eq!(config.decay.critical_days, 56);
    assert_eq!(config.robot.format, "jsonl");
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let config = Config::from_toml_str(&read_fixture("custom.toml")).unwrap();
    let defaults = Config::default();
    assert_eq!(config.timer.short_break_minutes, defaults.timer.short_break_minutes);
    assert_eq!(config.timer.long_break_minutes, defaults.timer.long_break_minutes);
    assert_eq!(
        config.decay.cert_expiry_warning_days,
        defaults.decay.cert_expiry_warning_days
    );
    assert_eq!(config.challenges, defaults.challenges);
}

#[test]
fn test_explicit_path_loads_fixture() {
    let root = tempdir().unwrap();
    let config = Config::load(Some(&fixture("custom.toml")), root.path()).unwrap();
    assert_eq!(config.display.default_sort, SortKey::Level);
}

#[test]
fn test_explicit_path_ignores_project_file() {
    let root = tempdir().unwrap();
    std::fs::write(
        root.path().join("config.toml"),
        "[display]\ntimeline_limit = 99\n",
    )
    .unwrap();
    let config = Config::load(Some(&fixture("default.toml")), root.path()).unwrap();
    assert_eq!(config.display.timeline_limit, 5);
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    let root = tempdir().unwrap();
    let missing = root.path().join("nope.toml");
    assert!(matches!(
        Config::load(Some(&missing), root.path()),
        Err(SklogError::MissingConfig(_))
    ));
}

#[test]
fn test_invalid_values_are_config_errors() {
    for raw in [
        "[timer]\nfocus_minutes = 0\n",
        "[timer]\nlong_break_every = 0\n",
        "[decay]\nmedium_days = 40\nhigh_days = 20\n",
        "[display\n",
    ] {
        assert!(
            matches!(Config::from_toml_str(raw), Err(SklogError::Config(_))),
            "expected a config error for {raw:?}"
        );
    }
}

#[test]
fn test_unknown_sort_name_is_rejected() {
    assert!(Config::from_toml_str("[display]\ndefault_sort = \"shuffle\"\n").is_err());
}
