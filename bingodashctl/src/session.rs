use anyhow::{Context, Result};
use bingodash_core::{AuthService, AuthSession, SnapshotStore};
use tracing::{debug, warn};

const SESSION_SNAPSHOT: &str = "session";

/// The signed-in session, kept between invocations in the state dir.
#[derive(Debug, Clone)]
pub struct SessionFile {
    snapshots: SnapshotStore,
}

impl SessionFile {
    pub fn new(snapshots: SnapshotStore) -> Self {
        Self { snapshots }
    }

    /// Re-installs the stored session, if any, on `auth`.
    pub async fn restore_into(&self, auth: &AuthService) {
        match self.snapshots.load::<AuthSession>(SESSION_SNAPSHOT) {
            Ok(Some(session)) => {
                debug!(email = %session.user.email, "restored session");
                auth.restore(session).await;
            }
            Ok(None) => debug!("no stored session"),
            Err(err) => warn!(error = %err, "stored session unreadable"),
        }
    }

    pub fn save(&self, session: &AuthSession) -> Result<()> {
        self.snapshots
            .save(SESSION_SNAPSHOT, session)
            .context("failed to store session")
    }

    pub fn clear(&self) -> Result<()> {
        self.snapshots
            .remove(SESSION_SNAPSHOT)
            .context("failed to remove stored session")
    }
}
