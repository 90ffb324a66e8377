use shared::domain::{Role, Section, View};
use thiserror::Error;

use crate::invites::InviteError;

/// Rejected user action. Rejections never change state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    #[error("'{action}' is not available on the {view:?} screen")]
    NotApplicable { action: &'static str, view: View },
    #[error("the {role} role cannot {action}")]
    NotPermitted { action: &'static str, role: Role },
    #[error("section '{section}' is not available to the {role} role")]
    SectionNotPermitted { section: Section, role: Role },
    #[error("nothing to {0}: no flow is open")]
    NoActiveFlow(&'static str),
    #[error("{0}")]
    Incomplete(&'static str),
    #[error(transparent)]
    Invite(#[from] InviteError),
}
