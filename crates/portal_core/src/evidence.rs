use shared::domain::Role;
use tracing::info;

use crate::error::PortalError;

/// Control table plus the upload panel.
#[derive(Debug, Clone)]
pub struct EvidenceDesk {
    role: Role,
    upload_open: bool,
    staged: Vec<String>,
}

impl EvidenceDesk {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            upload_open: false,
            staged: Vec::new(),
        }
    }

    pub fn can_upload(&self) -> bool {
        self.role != Role::Auditor
    }

    pub fn upload_open(&self) -> bool {
        self.upload_open
    }

    pub fn staged_files(&self) -> &[String] {
        &self.staged
    }

    pub fn open_upload(&mut self) -> Result<(), PortalError> {
        if !self.can_upload() {
            return Err(PortalError::NotPermitted {
                action: "upload evidence",
                role: self.role,
            });
        }
        self.upload_open = true;
        Ok(())
    }

    pub fn stage_file(&mut self, name: impl Into<String>) -> Result<(), PortalError> {
        if !self.upload_open {
            return Err(PortalError::NoActiveFlow("stage files"));
        }
        self.staged.push(name.into());
        Ok(())
    }

    /// Closes the panel; staged names stay listed for the next upload.
    pub fn cancel_upload(&mut self) {
        self.upload_open = false;
    }

    pub fn approve_upload(&mut self) -> Result<Vec<String>, PortalError> {
        if !self.upload_open {
            return Err(PortalError::NoActiveFlow("approve"));
        }
        self.upload_open = false;
        let files = std::mem::take(&mut self.staged);
        info!(count = files.len(), "evidence approved");
        Ok(files)
    }
}
