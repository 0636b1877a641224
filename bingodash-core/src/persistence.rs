//! Versioned JSON snapshots of dashboard state.
//!
//! Each snapshot is a single file `<name>.json` holding
//! `{"version": 1, ...fields}`. Missing fields fall back to their defaults;
//! a file written by a newer version or one that no longer parses is
//! discarded with a warning.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

/// Snapshot format written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode snapshot {name}: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct VersionProbe {
    #[serde(default)]
    version: u32,
}

#[derive(Serialize)]
struct Versioned<'a, T> {
    version: u32,
    #[serde(flatten)]
    state: &'a T,
}

#[derive(Deserialize)]
struct VersionedOwned<T> {
    #[serde(flatten)]
    state: T,
}

/// Directory of named snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Atomically writes `state` under `name`.
    pub fn save<T: Serialize>(
        &self,
        name: &str,
        state: &T,
    ) -> Result<(), SnapshotError> {
        let io_err = |source| SnapshotError::Io {
            path: self.path_for(name),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let bytes = serde_json::to_vec_pretty(&Versioned {
            version: SNAPSHOT_VERSION,
            state,
        })
        .map_err(|source| SnapshotError::Encode {
            name: name.to_string(),
            source,
        })?;

        let mut file = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.as_file().sync_all().map_err(io_err)?;
        file.persist(self.path_for(name))
            .map_err(|err| io_err(err.error))?;
        debug!(name, "snapshot saved");
        Ok(())
    }

    /// Reads the snapshot `name`.
    ///
    /// `Ok(None)` covers a missing file as well as a stale or corrupt one;
    /// only I/O failures other than "not found" are errors.
    pub fn load<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<T>, SnapshotError> {
        let path = self.path_for(name);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(None);
            }
            Err(source) => return Err(SnapshotError::Io { path, source }),
        };

        let version = match serde_json::from_slice::<VersionProbe>(&bytes) {
            Ok(probe) => probe.version,
            Err(err) => {
                warn!(name, error = %err, "discarding unreadable snapshot");
                return Ok(None);
            }
        };
        if version > SNAPSHOT_VERSION {
            warn!(
                name,
                version,
                supported = SNAPSHOT_VERSION,
                "discarding snapshot from a newer version"
            );
            return Ok(None);
        }

        match serde_json::from_slice::<VersionedOwned<T>>(&bytes) {
            Ok(versioned) => Ok(Some(versioned.state)),
            Err(err) => {
                warn!(name, error = %err, "discarding unreadable snapshot");
                Ok(None)
            }
        }
    }

    /// Like [`SnapshotStore::load`] but falls back to `T::default()`,
    /// logging I/O failures instead of returning them.
    pub fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        name: &str,
    ) -> T {
        match self.load(name) {
            Ok(state) => state.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "snapshot unavailable, using defaults");
                T::default()
            }
        }
    }

    pub fn remove(&self, name: &str) -> Result<(), SnapshotError> {
        let path = self.path_for(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SnapshotError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct ViewState {
        search_term: String,
        page_size: u32,
        pinned: Vec<String>,
    }

    #[test]
    fn saves_with_version_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        let state = ViewState {
            search_term: "spring".into(),
            page_size: 25,
            pinned: vec!["p1".into()],
        };

        store.save("promo_codes", &state).unwrap();
        let raw: serde_json::Value = serde_json::from_slice(
            &fs::read(store.path_for("promo_codes")).unwrap(),
        )
        .unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["search_term"], "spring");

        let back: Option<ViewState> = store.load("promo_codes").unwrap();
        assert_eq!(back, Some(state));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        fs::write(
            store.path_for("users"),
            r#"{"version":1,"search_term":"ada"}"#,
        )
        .unwrap();

        let state: ViewState = store.load_or_default("users");
        assert_eq!(state.search_term, "ada");
        assert_eq!(state.page_size, 0);
        assert!(state.pinned.is_empty());
    }

    #[test]
    fn newer_or_corrupt_snapshots_are_discarded() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());

        fs::write(store.path_for("newer"), r#"{"version":9,"page_size":5}"#)
            .unwrap();
        fs::write(store.path_for("corrupt"), "{not json").unwrap();

        assert_eq!(store.load::<ViewState>("newer").unwrap(), None);
        assert_eq!(store.load::<ViewState>("corrupt").unwrap(), None);
        assert_eq!(store.load::<ViewState>("absent").unwrap(), None);
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        store.save("session", &ViewState::default()).unwrap();
        store.remove("session").unwrap();
        store.remove("session").unwrap();
        assert!(!store.path_for("session").exists());
    }
}
