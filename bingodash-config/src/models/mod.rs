pub mod sources;

use std::path::PathBuf;
use std::time::Duration;

use bingodash_core::StoreSettings;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CARDS_PAGE_SIZE, DEFAULT_CHALLENGES_PAGE_SIZE, DEFAULT_LOG_FILTER,
    DEFAULT_PROMO_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE_MS, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USERS_PAGE_SIZE,
};

/// Fully resolved configuration for the admin tools.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub metadata: ConfigMetadata,
}

impl Config {
    /// Store tuning derived from the `[ui]` section.
    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            users_page_size: self.ui.page_sizes.users,
            promo_page_size: self.ui.page_sizes.promo_codes,
            cards_page_size: self.ui.page_sizes.bingo_cards,
            challenges_page_size: self.ui.page_sizes.challenges,
            search_debounce: self.ui.search_debounce,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Normalized: scheme present, no trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    pub search_debounce: Duration,
    pub page_sizes: PageSizes,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            page_sizes: PageSizes::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizes {
    pub users: u32,
    pub promo_codes: u32,
    pub bingo_cards: u32,
    pub challenges: u32,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            users: DEFAULT_USERS_PAGE_SIZE,
            promo_codes: DEFAULT_PROMO_PAGE_SIZE,
            bingo_cards: DEFAULT_CARDS_PAGE_SIZE,
            challenges: DEFAULT_CHALLENGES_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory for the session and screen snapshots.
    pub state_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Where the configuration came from.
#[derive(Debug, Clone)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
    /// Keys that were overridden from the environment.
    pub env_overrides: Vec<&'static str>,
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        Self {
            config_path: None,
            env_file_loaded: false,
            env_overrides: Vec::new(),
        }
    }
}

pub(crate) fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}
