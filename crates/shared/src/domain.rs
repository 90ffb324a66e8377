use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(MessageId);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseDomainError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseDomainError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Employee,
    Auditor,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Employee, Role::Auditor];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
            Role::Auditor => "auditor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Employee => "Employee",
            Role::Auditor => "Auditor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            "auditor" => Ok(Role::Auditor),
            _ => Err(ParseDomainError::new("role", s)),
        }
    }
}

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Hero,
    Roles,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Dashboard,
    Policies,
    Evidence,
    Journey,
    Settings,
    Risk,
    Vendors,
    Controls,
    Assets,
    Integrations,
    Training,
}

impl Section {
    /// Sidebar order.
    pub const ALL: [Section; 11] = [
        Section::Dashboard,
        Section::Policies,
        Section::Evidence,
        Section::Journey,
        Section::Settings,
        Section::Risk,
        Section::Vendors,
        Section::Controls,
        Section::Assets,
        Section::Integrations,
        Section::Training,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Policies => "policies",
            Section::Evidence => "evidence",
            Section::Journey => "journey",
            Section::Settings => "settings",
            Section::Risk => "risk",
            Section::Vendors => "vendors",
            Section::Controls => "controls",
            Section::Assets => "assets",
            Section::Integrations => "integrations",
            Section::Training => "training",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Policies => "AI Policies",
            Section::Evidence => "Evidence",
            Section::Journey => "Compliance Journey",
            Section::Settings => "Settings",
            Section::Risk => "Risk Management",
            Section::Vendors => "Vendors",
            Section::Controls => "Controls",
            Section::Assets => "Assets",
            Section::Integrations => "Integrations",
            Section::Training => "Training",
        }
    }

    pub fn admin_only(self) -> bool {
        matches!(
            self,
            Section::Settings
                | Section::Risk
                | Section::Vendors
                | Section::Controls
                | Section::Assets
                | Section::Integrations
        )
    }

    pub fn permitted_for(self, role: Role) -> bool {
        role == Role::Admin || !self.admin_only()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.id() == needle)
            .ok_or_else(|| ParseDomainError::new("section", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissionStatus {
    Available,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub title: String,
    pub description: String,
    /// Percentage, 0 to 100.
    pub progress: u8,
    pub difficulty: Difficulty,
    pub reward: String,
    pub status: MissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
}

impl Mission {
    pub fn action_label(&self) -> &'static str {
        match self.status {
            MissionStatus::Completed => "✓ Completed",
            MissionStatus::InProgress => "Continue Mission",
            MissionStatus::Available => "Start Mission",
        }
    }

    pub fn shows_progress(&self) -> bool {
        self.status != MissionStatus::Available
    }
}

/// A pending team invitation. Both fields start empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl Invite {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role: Some(role),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && self.role.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanyType {
    Fintech,
    DigitalBank,
    Regulated,
}

impl CompanyType {
    pub const ALL: [CompanyType; 3] = [
        CompanyType::Fintech,
        CompanyType::DigitalBank,
        CompanyType::Regulated,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CompanyType::Fintech => "fintech",
            CompanyType::DigitalBank => "digital-bank",
            CompanyType::Regulated => "regulated",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CompanyType::Fintech => "Fintech",
            CompanyType::DigitalBank => "Digital Bank",
            CompanyType::Regulated => "Regulated Institution",
        }
    }
}

impl FromStr for CompanyType {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        CompanyType::ALL
            .into_iter()
            .find(|kind| kind.id() == needle)
            .ok_or_else(|| ParseDomainError::new("company type", s))
    }
}

/// Compliance framework offered by the company setup flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Framework {
    #[serde(rename = "SOC2")]
    Soc2,
    #[serde(rename = "GDPR")]
    Gdpr,
    #[serde(rename = "PCI-DSS")]
    PciDss,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::Soc2, Framework::Gdpr, Framework::PciDss];

    pub fn name(self) -> &'static str {
        match self {
            Framework::Soc2 => "SOC2",
            Framework::Gdpr => "GDPR",
            Framework::PciDss => "PCI-DSS",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Framework::Soc2 => "Security and compliance standards",
            Framework::Gdpr => "Data protection regulation",
            Framework::PciDss => "Payment card industry security",
        }
    }
}

impl FromStr for Framework {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Framework::ALL
            .into_iter()
            .find(|fw| fw.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDomainError::new("framework", s))
    }
}
