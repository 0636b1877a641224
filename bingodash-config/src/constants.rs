//! Built-in defaults and environment variable names.

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_USERS_PAGE_SIZE: u32 = 10;
pub const DEFAULT_PROMO_PAGE_SIZE: u32 = 10;
pub const DEFAULT_CARDS_PAGE_SIZE: u32 = 50;
pub const DEFAULT_CHALLENGES_PAGE_SIZE: u32 = 10;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// File names probed in the working directory when no path is given.
pub const LOCAL_CONFIG_FILES: &[&str] = &["bingodash.toml", "bingodash.json"];
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Fallback state directory when the platform has no data dir.
pub const LOCAL_STATE_DIR: &str = ".bingodash";

pub const APP_QUALIFIER: &str = "app";
pub const APP_ORGANIZATION: &str = "healthbingo";
pub const APP_NAME: &str = "bingodash";

pub mod env {
    pub const CONFIG_PATH: &str = "BINGODASH_CONFIG";
    pub const API_URL: &str = "BINGODASH_API_URL";
    pub const API_TIMEOUT_SECS: &str = "BINGODASH_API_TIMEOUT_SECS";
    pub const SEARCH_DEBOUNCE_MS: &str = "BINGODASH_SEARCH_DEBOUNCE_MS";
    pub const USERS_PAGE_SIZE: &str = "BINGODASH_USERS_PAGE_SIZE";
    pub const PROMO_PAGE_SIZE: &str = "BINGODASH_PROMO_PAGE_SIZE";
    pub const CARDS_PAGE_SIZE: &str = "BINGODASH_CARDS_PAGE_SIZE";
    pub const CHALLENGES_PAGE_SIZE: &str = "BINGODASH_CHALLENGES_PAGE_SIZE";
    pub const STATE_DIR: &str = "BINGODASH_STATE_DIR";
    pub const LOG_FILTER: &str = "BINGODASH_LOG";
}
