//! Static sample content shown by the portal screens.

use shared::domain::{Difficulty, Mission, MissionStatus, Role};

pub const AUDIT_PREDICTION: &str = "80% ready → Estimated audit pass in 3 weeks";
pub const INTEGRATIONS: [&str; 4] = ["Google Drive", "Jira", "GitHub", "AWS"];
pub const JOURNEY_BADGES: [&str; 3] = ["Policy Pioneer", "Evidence Master", "Compliance Streak x3"];
pub const JOURNEY_PROGRESS: u8 = 80;

pub const NEXT_STEPS: [&str; 3] = [
    "Complete SOC 2 CC1.1 evidence collection",
    "Schedule quarterly policy review",
    "Update incident response procedures",
];

pub const ACHIEVEMENTS: [&str; 3] = [
    "12 policies created this month",
    "84% evidence coverage achieved",
    "Zero high-risk findings",
];

fn mission(
    title: &str,
    description: &str,
    progress: u8,
    difficulty: Difficulty,
    reward: &str,
    status: MissionStatus,
    estimated_time: &str,
) -> Mission {
    Mission {
        title: title.to_string(),
        description: description.to_string(),
        progress,
        difficulty,
        reward: reward.to_string(),
        status,
        estimated_time: Some(estimated_time.to_string()),
    }
}

pub fn missions() -> Vec<Mission> {
    vec![
        mission(
            "Create Your First Policy",
            "Generate a comprehensive data privacy policy using AI templates",
            100,
            Difficulty::Beginner,
            "Policy Master Badge",
            MissionStatus::Completed,
            "15 min",
        ),
        mission(
            "Upload Evidence for SOC 2",
            "Map evidence to SOC 2 Type II controls for audit readiness",
            65,
            Difficulty::Intermediate,
            "Compliance Streak x3",
            MissionStatus::InProgress,
            "2 hours",
        ),
        mission(
            "Complete Risk Assessment",
            "Use AI to identify and document potential security risks",
            0,
            Difficulty::Advanced,
            "Risk Guardian Badge",
            MissionStatus::Available,
            "45 min",
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCard {
    pub role: Role,
    pub title: &'static str,
    pub description: &'static str,
    pub features: [&'static str; 4],
}

pub fn role_cards() -> [RoleCard; 3] {
    [
        RoleCard {
            role: Role::Admin,
            title: "Admin Dashboard",
            description: "Full platform access, team management, policy creation",
            features: [
                "Create & manage policies",
                "Team oversight",
                "Full analytics",
                "System settings",
            ],
        },
        RoleCard {
            role: Role::Employee,
            title: "Employee Portal",
            description: "Mission-focused view, evidence upload, reward tracking",
            features: [
                "Complete missions",
                "Upload evidence",
                "Earn badges",
                "Track progress",
            ],
        },
        RoleCard {
            role: Role::Auditor,
            title: "Auditor View",
            description: "Read-only access, compliance review, audit preparation",
            features: [
                "Review policies",
                "Audit evidence",
                "Compliance reports",
                "Risk assessment",
            ],
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickStat {
    pub label: &'static str,
    pub value: &'static str,
}

pub fn quick_stats(role: Role) -> [QuickStat; 3] {
    let stat = |label, value| QuickStat { label, value };
    match role {
        Role::Admin => [
            stat("Active Policies", "12"),
            stat("Team Members", "24"),
            stat("Pending Reviews", "5"),
        ],
        Role::Employee => [
            stat("My Missions", "3"),
            stat("Badges Earned", "7"),
            stat("Evidence Uploaded", "15"),
        ],
        Role::Auditor => [
            stat("Total Policies", "12"),
            stat("Evidence Items", "156"),
            stat("Compliance Score", "78%"),
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreStatus {
    Excellent,
    Good,
    NeedsAttention,
}

impl ScoreStatus {
    pub fn label(self) -> &'static str {
        match self {
            ScoreStatus::Excellent => "Excellent",
            ScoreStatus::Good => "Good",
            ScoreStatus::NeedsAttention => "Needs Attention",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplianceScore {
    pub score: u8,
    pub trend: &'static str,
}

impl Default for ComplianceScore {
    fn default() -> Self {
        Self {
            score: 78,
            trend: "+12%",
        }
    }
}

impl ComplianceScore {
    pub fn status(&self) -> ScoreStatus {
        match self.score {
            80.. => ScoreStatus::Excellent,
            60..=79 => ScoreStatus::Good,
            _ => ScoreStatus::NeedsAttention,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub id: &'static str,
    pub description: &'static str,
    pub status: &'static str,
    pub evidence: &'static str,
}

pub fn controls() -> [Control; 2] {
    [
        Control {
            id: "SOC2 CC1.1",
            description: "Access Controls",
            status: "Approved",
            evidence: "84%",
        },
        Control {
            id: "GDPR Art. 5",
            description: "Data Processing",
            status: "Pending",
            evidence: "65%",
        },
    ]
}
