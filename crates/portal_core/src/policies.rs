//! Policy library and the new-policy flow.

use std::{fmt, str::FromStr};

use shared::domain::{ParseDomainError, Role};
use tracing::info;

use crate::{
    error::PortalError,
    wizard::{BackOutcome, StepOutcome, Wizard, WizardForm, LAST_STEP},
};

pub const GENERATED_DRAFT: &str = "AI-generated draft content here...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyStatus {
    Approved,
    Pending,
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyStatus::Approved => f.write_str("Approved"),
            PolicyStatus::Pending => f.write_str("Pending"),
        }
    }
}

impl FromStr for PolicyStatus {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approved" => Ok(PolicyStatus::Approved),
            "pending" => Ok(PolicyStatus::Pending),
            _ => Err(ParseDomainError {
                kind: "policy status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFramework {
    Soc2,
    Gdpr,
}

impl PolicyFramework {
    pub fn label(self) -> &'static str {
        match self {
            PolicyFramework::Soc2 => "SOC2 CC1.1",
            PolicyFramework::Gdpr => "GDPR",
        }
    }
}

impl FromStr for PolicyFramework {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soc2" => Ok(PolicyFramework::Soc2),
            "gdpr" => Ok(PolicyFramework::Gdpr),
            _ => Err(ParseDomainError {
                kind: "policy framework",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub title: String,
    pub framework: String,
    pub status: PolicyStatus,
}

fn sample_policies() -> Vec<Policy> {
    vec![
        Policy {
            title: "Data Privacy Policy".into(),
            framework: "GDPR".into(),
            status: PolicyStatus::Approved,
        },
        Policy {
            title: "Access Control Policy".into(),
            framework: "SOC2 CC1.1".into(),
            status: PolicyStatus::Pending,
        },
    ]
}

#[derive(Debug, Clone, Default)]
pub struct PolicyDraftForm {
    pub framework: Option<PolicyFramework>,
    pub prompt: String,
    pub draft: String,
    pub edited: String,
}

impl PolicyDraftForm {
    /// Edited text when present, otherwise the generated draft.
    pub fn policy_text(&self) -> &str {
        if self.edited.is_empty() {
            &self.draft
        } else {
            &self.edited
        }
    }
}

impl WizardForm for PolicyDraftForm {
    fn step_complete(&self, step: u8) -> bool {
        match step {
            1 => self.framework.is_some(),
            2 => !self.prompt.trim().is_empty(),
            3 => !self.policy_text().trim().is_empty(),
            _ => true,
        }
    }

    fn step_title(&self, step: u8) -> &'static str {
        match step {
            1 => "Framework",
            2 => "AI Draft Prompt",
            _ => "Edit Policy",
        }
    }

    fn finish_label(&self) -> &'static str {
        "Approve"
    }

    fn on_enter_step(&mut self, step: u8) {
        if step == LAST_STEP && self.draft.is_empty() {
            self.draft = GENERATED_DRAFT.to_string();
        }
    }
}

pub struct PolicyDesk {
    role: Role,
    library: Vec<Policy>,
    pub filter: Option<PolicyStatus>,
    flow: Option<Wizard<PolicyDraftForm>>,
}

impl PolicyDesk {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            library: sample_policies(),
            filter: None,
            flow: None,
        }
    }

    pub fn can_create(&self) -> bool {
        self.role != Role::Auditor
    }

    pub fn visible_policies(&self) -> impl Iterator<Item = &Policy> {
        self.library
            .iter()
            .filter(|policy| self.filter.map_or(true, |status| policy.status == status))
    }

    pub fn flow(&self) -> Option<&Wizard<PolicyDraftForm>> {
        self.flow.as_ref()
    }

    pub fn flow_form_mut(&mut self) -> Result<&mut PolicyDraftForm, PortalError> {
        self.flow
            .as_mut()
            .and_then(Wizard::form_mut)
            .ok_or(PortalError::NoActiveFlow("edit"))
    }

    pub fn open_new_policy(&mut self) -> Result<(), PortalError> {
        if !self.can_create() {
            return Err(PortalError::NotPermitted {
                action: "create policies",
                role: self.role,
            });
        }
        if self.flow.is_none() {
            self.flow = Some(Wizard::new(PolicyDraftForm::default()));
        }
        Ok(())
    }

    /// Approving the last step files the policy and returns to the library.
    pub fn next(&mut self) -> Result<StepOutcome, PortalError> {
        let flow = self.flow.as_mut().ok_or(PortalError::NoActiveFlow("advance"))?;
        let outcome = flow.next();
        if outcome == StepOutcome::Completed {
            if let Some(flow) = self.flow.take() {
                self.file_policy(flow.into_form());
            }
        }
        Ok(outcome)
    }

    /// Stepping back from the first step closes the flow.
    pub fn back(&mut self) -> Result<BackOutcome, PortalError> {
        let flow = self.flow.as_mut().ok_or(PortalError::NoActiveFlow("go back"))?;
        let outcome = flow.back();
        if outcome == BackOutcome::AtFirstStep {
            self.flow = None;
        }
        Ok(outcome)
    }

    pub fn cancel(&mut self) {
        self.flow = None;
    }

    fn file_policy(&mut self, form: PolicyDraftForm) {
        let framework = form
            .framework
            .map(PolicyFramework::label)
            .unwrap_or_default()
            .to_string();
        let title = form.prompt.trim().to_string();
        info!(%title, %framework, "policy approved");
        self.library.push(Policy {
            title,
            framework,
            status: PolicyStatus::Approved,
        });
    }
}
