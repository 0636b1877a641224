pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use bingodash_core::api::client::normalize_base_url;
use tracing::debug;
use url::Url;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_SEARCH_DEBOUNCE_MS, LOCAL_CONFIG_FILES,
    LOCAL_STATE_DIR,
};
use crate::models::sources::{EnvConfig, FileConfig};
use crate::models::{
    ApiConfig, Config, ConfigMetadata, LoggingConfig, PageSizes,
    StorageConfig, UiConfig, default_timeout,
};
use crate::util::{default_config_dir, default_state_dir};

use self::error::ConfigLoadError;

/// Result of a load: the config plus anything worth telling the operator.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: Vec<String>,
}

/// Builder for the layered configuration load.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    load_env_file: bool,
    base_dir: PathBuf,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            config_path: None,
            env_file: None,
            load_env_file: true,
            base_dir: PathBuf::from("."),
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit config file. Takes precedence over `BINGODASH_CONFIG` and
    /// the default locations.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self.load_env_file = true;
        self
    }

    pub fn without_env_file(mut self) -> Self {
        self.load_env_file = false;
        self
    }

    /// Directory searched for `bingodash.toml`/`bingodash.json` and used
    /// for the local state fallback.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Resolve against an already-gathered environment.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let config_path = self
            .config_path
            .clone()
            .or_else(|| env.config_path.clone())
            .or_else(|| self.discover_config_file());

        let file = match &config_path {
            Some(path) => {
                debug!("loading config file {}", path.display());
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };

        let metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
            env_overrides: env.overridden_keys(),
        };
        let load = resolve(file, env, metadata, &self.base_dir)?;
        debug!(
            base_url = %load.config.api.base_url,
            warnings = load.warnings.len(),
            "configuration resolved"
        );
        Ok(load)
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        if !self.load_env_file {
            return Ok(false);
        }
        let result = match &self.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| ()),
            None => dotenvy::dotenv().map(|_| ()),
        };
        match result {
            Ok(()) => Ok(true),
            Err(err) if err.not_found() && self.env_file.is_none() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn discover_config_file(&self) -> Option<PathBuf> {
        let local = LOCAL_CONFIG_FILES
            .iter()
            .map(|name| self.base_dir.join(name));
        let user = default_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME));
        local.chain(user).find(|path| path.is_file())
    }
}

fn resolve(
    file: FileConfig,
    env: EnvConfig,
    metadata: ConfigMetadata,
    base_dir: &Path,
) -> Result<ConfigLoad, ConfigLoadError> {
    let mut warnings = Vec::new();

    let raw_url = env
        .api_url
        .or(file.api.base_url)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or(ConfigLoadError::MissingBaseUrl)?;
    let base_url = normalize_base_url(&raw_url);
    Url::parse(&base_url).map_err(|source| {
        ConfigLoadError::InvalidBaseUrl {
            url: raw_url.clone(),
            source,
        }
    })?;
    if base_url != raw_url {
        warnings.push(format!(
            "normalized API base URL from '{raw_url}' to '{base_url}'"
        ));
    }

    let timeout = env
        .api_timeout_secs
        .or(file.api.timeout_secs)
        .map(Duration::from_secs)
        .unwrap_or_else(default_timeout);
    if timeout.is_zero() {
        return Err(ConfigLoadError::ZeroValue {
            field: "api.timeout_secs",
        });
    }

    let search_debounce = Duration::from_millis(
        env.search_debounce_ms
            .or(file.ui.search_debounce_ms)
            .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS),
    );

    let defaults = PageSizes::default();
    let sizes = &file.ui.page_sizes;
    let page_sizes = PageSizes {
        users: page_size(
            "ui.page_sizes.users",
            env.users_page_size.or(sizes.users),
            defaults.users,
        )?,
        promo_codes: page_size(
            "ui.page_sizes.promo_codes",
            env.promo_page_size.or(sizes.promo_codes),
            defaults.promo_codes,
        )?,
        bingo_cards: page_size(
            "ui.page_sizes.bingo_cards",
            env.cards_page_size.or(sizes.bingo_cards),
            defaults.bingo_cards,
        )?,
        challenges: page_size(
            "ui.page_sizes.challenges",
            env.challenges_page_size.or(sizes.challenges),
            defaults.challenges,
        )?,
    };

    let state_dir = match env.state_dir.or(file.storage.state_dir) {
        Some(dir) => dir,
        None => default_state_dir().unwrap_or_else(|| {
            warnings.push(format!(
                "no platform data directory; using {}",
                base_dir.join(LOCAL_STATE_DIR).display()
            ));
            base_dir.join(LOCAL_STATE_DIR)
        }),
    };
    if state_dir.as_os_str().is_empty() {
        return Err(ConfigLoadError::NoStateDir);
    }

    let logging = LoggingConfig {
        filter: env
            .log_filter
            .or(file.logging.filter)
            .unwrap_or_else(|| LoggingConfig::default().filter),
    };

    Ok(ConfigLoad {
        config: Config {
            api: ApiConfig { base_url, timeout },
            ui: UiConfig {
                search_debounce,
                page_sizes,
            },
            storage: StorageConfig { state_dir },
            logging,
            metadata,
        },
        warnings,
    })
}

fn page_size(
    field: &'static str,
    value: Option<u32>,
    default: u32,
) -> Result<u32, ConfigLoadError> {
    match value.unwrap_or(default) {
        0 => Err(ConfigLoadError::ZeroValue { field }),
        size => Ok(size),
    }
}
