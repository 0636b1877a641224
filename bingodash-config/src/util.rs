use std::path::PathBuf;

use directories::ProjectDirs;

use crate::constants::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};

/// Non-blank value, trimmed.
pub fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn parse_number<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
    non_blank(raw).and_then(|v| v.parse().ok())
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
}

pub fn default_config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn default_state_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}
