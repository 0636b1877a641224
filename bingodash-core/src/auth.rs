use std::sync::Arc;

use bingodash_model::{AuthPayload, RefreshRequest, SignInRequest, User};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::AdminApi;
use crate::error::{ApiError, ApiResult};

/// Signed-in operator plus the tokens that authorize their requests.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
    pub refresh_token: String,
}

impl AuthSession {
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

impl From<AuthPayload> for AuthSession {
    fn from(payload: AuthPayload) -> Self {
        Self {
            user: payload.user,
            token: payload.token,
            refresh_token: payload.refresh_token,
        }
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user", &self.user.email)
            .field("role", &self.user.role)
            .finish_non_exhaustive()
    }
}

/// Owns the current session and keeps the API client's bearer token in
/// step with it.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn AdminApi>,
    session: Arc<RwLock<Option<AuthSession>>>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("session", &*self.session.read())
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            session: Arc::default(),
        }
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.session.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .read()
            .as_ref()
            .is_some_and(AuthSession::is_admin)
    }

    /// Signs in with the admin role.
    ///
    /// Accounts the backend does not report as admins are refused and no
    /// session is kept.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> ApiResult<AuthSession> {
        let request = SignInRequest::admin(email, password);
        let session = AuthSession::from(self.api.sign_in(&request).await?);
        if !session.is_admin() {
            warn!(email, "sign-in refused for non-admin account");
            return Err(ApiError::NotAdmin {
                email: session.user.email,
            });
        }
        self.install(session.clone()).await;
        info!(email, "signed in");
        Ok(session)
    }

    /// Exchanges the refresh token for a new session.
    ///
    /// Any failure ends the session.
    pub async fn refresh(&self) -> ApiResult<AuthSession> {
        let refresh_token = self
            .current()
            .map(|s| s.refresh_token)
            .ok_or(ApiError::NotSignedIn)?;
        match self.api.refresh(&RefreshRequest { refresh_token }).await {
            Ok(payload) => {
                let session = AuthSession::from(payload);
                self.install(session.clone()).await;
                info!("session refreshed");
                Ok(session)
            }
            Err(err) => {
                warn!(error = %err, "session refresh failed");
                self.sign_out().await;
                Err(err)
            }
        }
    }

    /// Whether the backend still accepts the current token.
    pub async fn verify(&self) -> ApiResult<bool> {
        if !self.is_authenticated() {
            return Ok(false);
        }
        self.api.verify_token().await
    }

    /// Re-installs a persisted session without contacting the backend.
    pub async fn restore(&self, session: AuthSession) {
        self.install(session).await;
    }

    pub async fn sign_out(&self) {
        self.session.write().take();
        self.api.set_token(None).await;
    }

    async fn install(&self, session: AuthSession) {
        let token = session.token.clone();
        *self.session.write() = Some(session);
        self.api.set_token(Some(token)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAdminApi;
    use bingodash_model::chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    fn payload(role: &str) -> AuthPayload {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        AuthPayload {
            user: User {
                id: "u-admin".into(),
                email: "ops@healthbingo.app".into(),
                first_name: "Ops".into(),
                last_name: "Team".into(),
                display_name: None,
                country: None,
                timezone: None,
                push_reminders: false,
                auth_provider: "email".into(),
                image: None,
                role: role.into(),
                activated: None,
                created_at: at,
                updated_at: at,
            },
            token: "access-1".into(),
            refresh_token: "refresh-1".into(),
        }
    }

    #[tokio::test]
    async fn sign_in_installs_bearer_token() {
        let mut api = MockAdminApi::new();
        api.expect_sign_in()
            .withf(|request| request.role == "admin")
            .returning(|_| Ok(payload("admin")));
        api.expect_set_token()
            .with(eq(Some("access-1".to_string())))
            .times(1)
            .return_const(());

        let auth = AuthService::new(Arc::new(api));
        let session = auth.sign_in("ops@healthbingo.app", "pw").await.unwrap();
        assert!(session.is_admin());
        assert!(auth.is_admin());
    }

    #[tokio::test]
    async fn non_admin_accounts_are_refused() {
        let mut api = MockAdminApi::new();
        api.expect_sign_in().returning(|_| Ok(payload("user")));
        api.expect_set_token().never();

        let auth = AuthService::new(Arc::new(api));
        let err = auth.sign_in("ops@healthbingo.app", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::NotAdmin { .. }));
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn failed_refresh_signs_out() {
        let mut api = MockAdminApi::new();
        api.expect_set_token().return_const(());
        api.expect_refresh()
            .withf(|request| request.refresh_token == "refresh-1")
            .returning(|_| Err(ApiError::AuthExpired));

        let auth = AuthService::new(Arc::new(api));
        auth.restore(payload("admin").into()).await;
        assert!(auth.refresh().await.unwrap_err().is_auth_expired());
        assert!(auth.current().is_none());
    }

    #[tokio::test]
    async fn refresh_without_session_is_not_signed_in() {
        let auth = AuthService::new(Arc::new(MockAdminApi::new()));
        assert_eq!(auth.refresh().await.unwrap_err(), ApiError::NotSignedIn);
        assert!(!auth.verify().await.unwrap());
    }
}
