use bingodash_model::ModelError;
use thiserror::Error;

/// Fallback when an error response carries no readable message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Request failed";

/// Fallback when an error response body is not JSON at all.
pub const UNREADABLE_ERROR_MESSAGE: &str = "An error occurred";

/// Failure of a backend call or of the local validation that guards it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend answered 401. Callers route the operator back to sign-in;
    /// the request is never retried.
    #[error("Unauthorized - please sign in again")]
    AuthExpired,

    #[error("No active session - run `login` first")]
    NotSignedIn,

    #[error("Account {email} is not an administrator")]
    NotAdmin { email: String },

    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error(transparent)]
    Validation(#[from] ModelError),
}

impl ApiError {
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }

    /// HTTP status for backend-reported failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthExpired => Some(401),
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
