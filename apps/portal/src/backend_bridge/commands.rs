//! Backend commands queued from UI to backend worker.

use portal_core::Registration;

/// Tags a queued sign-up so its result can be matched to the submit that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionId(pub u64);

#[derive(Debug)]
pub enum BackendCommand {
    SignUp {
        submission: SubmissionId,
        registration: Registration,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SignUp { .. } => "sign_up",
        }
    }
}
