use thiserror::Error;

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
