//! Backend events and error modeling for the portal controller.

use portal_core::RegistrationOutcome;
use shared::error::{ErrorCode, SignupFailure};

use crate::backend_bridge::commands::SubmissionId;

#[derive(Debug)]
pub enum UiEvent {
    SignupFinished {
        submission: SubmissionId,
        result: Result<RegistrationOutcome, SignupFailure>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Configuration,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    SignUp,
    Navigation,
}

const AUTH_HINTS: &[&str] = &[
    "401",
    "403",
    "unauthorized",
    "forbidden",
    "invalid api key",
    "already registered",
];
const CONFIGURATION_HINTS: &[&str] = &["unavailable: set", "not configured", "startup failure"];
const VALIDATION_HINTS: &[&str] = &[
    "required",
    "invalid",
    "missing",
    "cannot",
    "not available",
    "needs",
    "first",
];
const TRANSPORT_HINTS: &[&str] = &[
    "timeout",
    "timed out",
    "connection",
    "network",
    "request failed",
    "disconnect",
];

fn mentions(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_ascii_lowercase();
        let category = if mentions(&lowered, AUTH_HINTS) {
            UiErrorCategory::Auth
        } else if mentions(&lowered, CONFIGURATION_HINTS) {
            UiErrorCategory::Configuration
        } else if mentions(&lowered, VALIDATION_HINTS) {
            UiErrorCategory::Validation
        } else if mentions(&lowered, TRANSPORT_HINTS) {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
        }
    }

    /// Classifies by the failure's code rather than its text.
    pub fn from_failure(context: UiErrorContext, failure: &SignupFailure) -> Self {
        let category = match failure.code() {
            ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::NotConfigured => UiErrorCategory::Configuration,
            ErrorCode::Account => UiErrorCategory::Auth,
            ErrorCode::Transport => UiErrorCategory::Transport,
            ErrorCode::Record => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: failure.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status line text.
    pub fn describe(&self) -> String {
        match (self.context, self.category) {
            (UiErrorContext::SignUp, UiErrorCategory::Transport) => format!(
                "Sign-up service unreachable; check the configured URL and retry. ({})",
                self.message
            ),
            (UiErrorContext::BackendStartup, _) => format!(
                "Backend worker startup failure; sign-up is unavailable. ({})",
                self.message
            ),
            _ => self.message.clone(),
        }
    }
}
