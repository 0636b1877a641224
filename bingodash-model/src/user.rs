use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::EntityId;

/// Role string the backend assigns to dashboard operators.
pub const ADMIN_ROLE: &str = "admin";

/// Minimum password length accepted when creating an admin account.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Application user as returned by `/api/user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub push_reminders: bool,
    #[serde(default)]
    pub auth_provider: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activated: Option<bool>,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case(ADMIN_ROLE)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Two-letter avatar fallback used when the user has no image.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Request payload to create an admin account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAdminRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl CreateAdminRequest {
    /// Rejects malformed input before any request is issued.
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(ModelError::MissingField { field: "email" });
        }
        if self.first_name.trim().is_empty() {
            return Err(ModelError::MissingField {
                field: "first_name",
            });
        }
        if self.last_name.trim().is_empty() {
            return Err(ModelError::MissingField { field: "last_name" });
        }
        if self.password != self.confirm_password {
            return Err(ModelError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ModelError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(())
    }
}

/// Partial update for a user; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activated: Option<bool>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overlays the present fields onto `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(display_name) = &self.display_name {
            user.display_name = Some(display_name.clone());
        }
        if let Some(country) = &self.country {
            user.country = Some(country.clone());
        }
        if let Some(timezone) = &self.timezone {
            user.timezone = Some(timezone.clone());
        }
        if let Some(role) = &self.role {
            user.role = role.clone();
        }
        if let Some(activated) = self.activated {
            user.activated = Some(activated);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_request(password: &str, confirm: &str) -> CreateAdminRequest {
        CreateAdminRequest {
            email: "ops@healthbingo.app".into(),
            first_name: "Ada".into(),
            last_name: "Ops".into(),
            password: password.into(),
            confirm_password: confirm.into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_admin_rejects_short_password() {
        let err = admin_request("abc", "abc").validate().unwrap_err();
        assert_eq!(err, ModelError::PasswordTooShort { min: 6 });
    }

    #[test]
    fn create_admin_rejects_mismatched_confirmation() {
        let err = admin_request("secret1", "secret2").validate().unwrap_err();
        assert_eq!(err, ModelError::PasswordMismatch);
    }

    #[test]
    fn create_admin_never_serializes_confirmation() {
        let json =
            serde_json::to_value(admin_request("secret1", "secret1")).unwrap();
        assert!(json.get("confirm_password").is_none());
        assert_eq!(json["password"], "secret1");
    }

    #[test]
    fn user_deserializes_with_sparse_fields() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u-1",
            "email": "a@b.c",
            "first_name": "grace",
            "last_name": "hopper",
            "role": "ADMIN",
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-02T10:00:00Z"
        }))
        .unwrap();
        assert!(user.is_admin());
        assert_eq!(user.initials(), "GH");
        assert_eq!(user.display_name, None);
    }
}
