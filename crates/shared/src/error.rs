use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    NotConfigured,
    Account,
    Record,
    Transport,
}

/// Failure of the sign-up flow. The display string is what the form shows inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupFailure {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotConfigured(String),
    #[error("{0}")]
    Account(String),
    #[error("Failed to insert record: {0}")]
    Record(String),
    #[error("{0}")]
    Transport(String),
}

impl SignupFailure {
    pub fn code(&self) -> ErrorCode {
        match self {
            SignupFailure::Validation(_) => ErrorCode::Validation,
            SignupFailure::NotConfigured(_) => ErrorCode::NotConfigured,
            SignupFailure::Account(_) => ErrorCode::Account,
            SignupFailure::Record(_) => ErrorCode::Record,
            SignupFailure::Transport(_) => ErrorCode::Transport,
        }
    }
}
