use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use bingodash_config::constants::env;
use bingodash_config::{ConfigLoadError, ConfigLoader, EnvConfig};
use tempfile::TempDir;

fn env_from(pairs: &[(&str, &str)]) -> EnvConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvConfig::from_lookup(|key| vars.get(key).cloned())
}

fn loader(dir: &TempDir) -> ConfigLoader {
    ConfigLoader::new()
        .without_env_file()
        .with_base_dir(dir.path())
}

#[test]
fn defaults_apply_when_only_url_is_set() {
    let dir = TempDir::new().unwrap();
    let load = loader(&dir)
        .load_with_env(
            env_from(&[
                (env::API_URL, "https://api.example.com/"),
                (env::STATE_DIR, "/tmp/bingodash-state"),
            ]),
            false,
        )
        .unwrap();
    let cfg = load.config;

    assert_eq!(cfg.api.base_url, "https://api.example.com");
    assert_eq!(cfg.api.timeout, Duration::from_secs(30));
    assert_eq!(cfg.ui.search_debounce, Duration::from_millis(500));
    assert_eq!(cfg.ui.page_sizes.users, 10);
    assert_eq!(cfg.ui.page_sizes.promo_codes, 10);
    assert_eq!(cfg.ui.page_sizes.bingo_cards, 50);
    assert_eq!(cfg.ui.page_sizes.challenges, 10);
    assert_eq!(cfg.logging.filter, "info");
    assert!(cfg.metadata.config_path.is_none());
    assert_eq!(load.warnings.len(), 1, "trailing slash normalization");

    let settings = cfg.store_settings();
    assert_eq!(settings.cards_page_size, 50);
    assert_eq!(settings.search_debounce, Duration::from_millis(500));
}

#[test]
fn local_toml_is_discovered_and_env_wins() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bingodash.toml"),
        r#"
[api]
base_url = "https://file.example.com"
timeout_secs = 5

[ui]
search_debounce_ms = 250

[ui.page_sizes]
users = 25
bingo_cards = 100

[storage]
state_dir = "state"

[logging]
filter = "bingodash_core=debug"
"#,
    )
    .unwrap();

    let cfg = loader(&dir)
        .load_with_env(env_from(&[(env::USERS_PAGE_SIZE, "15")]), false)
        .unwrap()
        .config;

    assert_eq!(cfg.api.base_url, "https://file.example.com");
    assert_eq!(cfg.api.timeout, Duration::from_secs(5));
    assert_eq!(cfg.ui.search_debounce, Duration::from_millis(250));
    assert_eq!(cfg.ui.page_sizes.users, 15);
    assert_eq!(cfg.ui.page_sizes.bingo_cards, 100);
    assert_eq!(cfg.ui.page_sizes.challenges, 10);
    assert_eq!(cfg.storage.state_dir, std::path::PathBuf::from("state"));
    assert_eq!(cfg.logging.filter, "bingodash_core=debug");
    assert_eq!(
        cfg.metadata.config_path,
        Some(dir.path().join("bingodash.toml"))
    );
    assert_eq!(cfg.metadata.env_overrides, vec![env::USERS_PAGE_SIZE]);
}

#[test]
fn explicit_json_path_is_parsed_as_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.json");
    fs::write(
        &path,
        r#"{"api":{"base_url":"localhost:3000"},"storage":{"state_dir":"s"}}"#,
    )
    .unwrap();

    let cfg = loader(&dir)
        .with_config_path(&path)
        .load_with_env(EnvConfig::default(), false)
        .unwrap()
        .config;
    assert_eq!(cfg.api.base_url, "http://localhost:3000");
}

#[test]
fn missing_url_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = loader(&dir)
        .load_with_env(EnvConfig::default(), false)
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingBaseUrl));
}

#[test]
fn zero_page_size_is_rejected() {
    let dir = TempDir::new().unwrap();
    let err = loader(&dir)
        .load_with_env(
            env_from(&[
                (env::API_URL, "https://api.example.com"),
                (env::CHALLENGES_PAGE_SIZE, "0"),
            ]),
            false,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigLoadError::ZeroValue {
            field: "ui.page_sizes.challenges"
        }
    ));
}

#[test]
fn malformed_file_reports_its_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[api\nbase_url = ").unwrap();

    let err = loader(&dir)
        .with_config_path(&path)
        .load_with_env(EnvConfig::default(), false)
        .unwrap_err();
    match err {
        ConfigLoadError::ParseToml { path: reported, .. } => {
            assert_eq!(reported, path)
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn explicit_env_file_must_exist() {
    let dir = TempDir::new().unwrap();
    let err = ConfigLoader::new()
        .with_base_dir(dir.path())
        .with_env_file(dir.path().join("missing.env"))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::EnvFile(_)));
}
