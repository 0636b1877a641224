use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML config {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to parse JSON config {path}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
    #[error(
        "API base URL is not configured; set api.base_url or BINGODASH_API_URL"
    )]
    MissingBaseUrl,
    #[error("invalid API base URL {url:?}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },
    #[error(
        "no state directory available; set storage.state_dir or BINGODASH_STATE_DIR"
    )]
    NoStateDir,
}
