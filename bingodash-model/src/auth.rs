use serde::{Deserialize, Serialize};

use crate::user::{ADMIN_ROLE, User};

/// Credentials posted to `/api/auth/signin`. The dashboard always signs in
/// with the admin role.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

impl SignInRequest {
    pub fn admin(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role: ADMIN_ROLE.to_string(),
        }
    }
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// `data` section of the sign-in and refresh responses.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

impl std::fmt::Debug for AuthPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthPayload")
            .field("user", &self.user.email)
            .field("has_token", &!self.token.is_empty())
            .finish_non_exhaustive()
    }
}
