//! Ordered, index-addressed invite editing.

use shared::domain::{Invite, Role};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InviteError {
    #[error("no invite at position {index} (have {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("invite {} needs an email and a role", index + 1)]
    Incomplete { index: usize },
}

/// Starts with a single blank row, like the editors that use it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteList {
    invites: Vec<Invite>,
}

impl Default for InviteList {
    fn default() -> Self {
        Self {
            invites: vec![Invite::default()],
        }
    }
}

impl InviteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.invites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invites.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Invite> {
        self.invites.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Invite> {
        self.invites.iter()
    }

    /// Appends a blank row and returns its index.
    pub fn push_empty(&mut self) -> usize {
        self.invites.push(Invite::default());
        self.invites.len() - 1
    }

    /// Replaces the row at `index`, returning the previous value.
    pub fn replace_at(&mut self, index: usize, invite: Invite) -> Result<Invite, InviteError> {
        let len = self.invites.len();
        let slot = self
            .invites
            .get_mut(index)
            .ok_or(InviteError::OutOfRange { index, len })?;
        Ok(std::mem::replace(slot, invite))
    }

    pub fn set_email(&mut self, index: usize, email: impl Into<String>) -> Result<(), InviteError> {
        let current = self.row(index)?;
        let updated = Invite {
            email: email.into(),
            role: current.role,
        };
        self.replace_at(index, updated).map(|_| ())
    }

    pub fn set_role(&mut self, index: usize, role: Role) -> Result<(), InviteError> {
        let current = self.row(index)?;
        let updated = Invite {
            email: current.email.clone(),
            role: Some(role),
        };
        self.replace_at(index, updated).map(|_| ())
    }

    pub fn first_incomplete(&self) -> Option<usize> {
        self.invites.iter().position(|invite| !invite.is_complete())
    }

    pub fn is_complete(&self) -> bool {
        self.first_incomplete().is_none()
    }

    pub fn to_vec(&self) -> Vec<Invite> {
        self.invites.clone()
    }

    fn row(&self, index: usize) -> Result<&Invite, InviteError> {
        self.invites.get(index).ok_or(InviteError::OutOfRange {
            index,
            len: self.invites.len(),
        })
    }
}

/// Admin team management screen.
#[derive(Debug, Clone, Default)]
pub struct TeamSettings {
    pub invites: InviteList,
    sent: Vec<Invite>,
}

impl TeamSettings {
    pub fn can_send(&self) -> bool {
        self.invites.is_complete()
    }

    pub fn sent(&self) -> &[Invite] {
        &self.sent
    }

    /// Sends every row and resets the editor to one blank row.
    pub fn send_invites(&mut self) -> Result<Vec<Invite>, InviteError> {
        if let Some(index) = self.invites.first_incomplete() {
            return Err(InviteError::Incomplete { index });
        }
        let batch = std::mem::take(&mut self.invites).to_vec();
        info!(count = batch.len(), "team invites sent");
        self.sent.extend(batch.iter().cloned());
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_rows_by_index() {
        let mut list = InviteList::new();
        assert_eq!(list.len(), 1);
        assert!(!list.is_complete());

        list.set_email(0, "cfo@example.com").expect("email");
        list.set_role(0, Role::Admin).expect("role");
        assert!(list.is_complete());

        let second = list.push_empty();
        assert_eq!(second, 1);
        assert_eq!(list.first_incomplete(), Some(1));

        let previous = list
            .replace_at(1, Invite::new("auditor@example.com", Role::Auditor))
            .expect("replace");
        assert_eq!(previous, Invite::default());
        assert_eq!(list.get(0).expect("row").email, "cfo@example.com");
        assert!(list.is_complete());
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut list = InviteList::new();
        assert_eq!(
            list.set_role(3, Role::Employee),
            Err(InviteError::OutOfRange { index: 3, len: 1 })
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn team_settings_sends_only_complete_batches() {
        let mut team = TeamSettings::default();
        assert!(!team.can_send());
        let err = team.send_invites().expect_err("blank row");
        assert_eq!(err.to_string(), "invite 1 needs an email and a role");

        team.invites.set_email(0, "dev@example.com").expect("email");
        team.invites.set_role(0, Role::Employee).expect("role");
        let sent = team.send_invites().expect("send");
        assert_eq!(sent, vec![Invite::new("dev@example.com", Role::Employee)]);
        assert_eq!(team.sent().len(), 1);
        assert_eq!(team.invites, InviteList::new());
    }
}
