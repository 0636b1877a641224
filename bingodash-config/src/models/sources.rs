use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::env;
use crate::loader::error::ConfigLoadError;
use crate::util::{non_blank, parse_number};

/// Configuration as written on disk. Every field is optional; missing
/// values fall through to the environment and then to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub api: FileApiConfig,
    #[serde(default)]
    pub ui: FileUiConfig,
    #[serde(default)]
    pub storage: FileStorageConfig,
    #[serde(default)]
    pub logging: FileLoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_debounce_ms: Option<u64>,
    #[serde(default)]
    pub page_sizes: FilePageSizes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePageSizes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_codes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bingo_cards: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl FileConfig {
    /// Read a config file. `.json` is parsed as JSON, `.toml` as TOML, and
    /// anything else is tried as TOML first and then JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            ConfigLoadError::ReadFile {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Self::parse_json(path, &raw),
            Some("toml") | Some("tml") => Self::parse_toml(path, &raw),
            _ => Self::parse_toml(path, &raw)
                .or_else(|_| Self::parse_json(path, &raw)),
        }
    }

    fn parse_toml(path: &Path, raw: &str) -> Result<Self, ConfigLoadError> {
        toml::from_str(raw).map_err(|source| ConfigLoadError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse_json(path: &Path, raw: &str) -> Result<Self, ConfigLoadError> {
        serde_json::from_str(raw).map_err(|source| {
            ConfigLoadError::ParseJson {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

/// Overrides read from `BINGODASH_*` variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub api_timeout_secs: Option<u64>,
    pub search_debounce_ms: Option<u64>,
    pub users_page_size: Option<u32>,
    pub promo_page_size: Option<u32>,
    pub cards_page_size: Option<u32>,
    pub challenges_page_size: Option<u32>,
    pub state_dir: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank or unparsable values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            config_path: non_blank(lookup(env::CONFIG_PATH)).map(PathBuf::from),
            api_url: non_blank(lookup(env::API_URL)),
            api_timeout_secs: parse_number(lookup(env::API_TIMEOUT_SECS)),
            search_debounce_ms: parse_number(lookup(env::SEARCH_DEBOUNCE_MS)),
            users_page_size: parse_number(lookup(env::USERS_PAGE_SIZE)),
            promo_page_size: parse_number(lookup(env::PROMO_PAGE_SIZE)),
            cards_page_size: parse_number(lookup(env::CARDS_PAGE_SIZE)),
            challenges_page_size: parse_number(lookup(
                env::CHALLENGES_PAGE_SIZE,
            )),
            state_dir: non_blank(lookup(env::STATE_DIR)).map(PathBuf::from),
            log_filter: non_blank(lookup(env::LOG_FILTER)),
        }
    }

    /// Names of the variables that carried a usable value.
    pub fn overridden_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        let mut mark = |set: bool, key: &'static str| {
            if set {
                keys.push(key);
            }
        };
        mark(self.api_url.is_some(), env::API_URL);
        mark(self.api_timeout_secs.is_some(), env::API_TIMEOUT_SECS);
        mark(self.search_debounce_ms.is_some(), env::SEARCH_DEBOUNCE_MS);
        mark(self.users_page_size.is_some(), env::USERS_PAGE_SIZE);
        mark(self.promo_page_size.is_some(), env::PROMO_PAGE_SIZE);
        mark(self.cards_page_size.is_some(), env::CARDS_PAGE_SIZE);
        mark(self.challenges_page_size.is_some(), env::CHALLENGES_PAGE_SIZE);
        mark(self.state_dir.is_some(), env::STATE_DIR);
        mark(self.log_filter.is_some(), env::LOG_FILTER);
        keys
    }
}
