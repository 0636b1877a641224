//! Configuration for the bingodash admin tools.
//!
//! Values are layered: built-in defaults, then a TOML (or JSON) file, then
//! `BINGODASH_*` environment variables, optionally seeded from a `.env`
//! file. The resolved [`Config`] is validated before it is handed out.

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    ApiConfig, Config, ConfigMetadata, LoggingConfig, PageSizes,
    StorageConfig, UiConfig,
};
