use shared::domain::{Mission, Role};

use crate::catalog::{
    self, ComplianceScore, QuickStat, ACHIEVEMENTS, AUDIT_PREDICTION, JOURNEY_BADGES,
    JOURNEY_PROGRESS, NEXT_STEPS,
};

/// Landing content of the dashboard section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub stats: [QuickStat; 3],
    pub score: ComplianceScore,
    pub missions_heading: &'static str,
    pub missions: Vec<Mission>,
    /// Empty for auditors, who do not get the insights panel.
    pub next_steps: Vec<&'static str>,
    pub achievements: Vec<&'static str>,
}

impl Overview {
    pub fn for_role(role: Role) -> Self {
        let (title, subtitle) = match role {
            Role::Admin => (
                "Admin Dashboard",
                "Manage your organization's compliance journey",
            ),
            Role::Employee => (
                "My Compliance Missions",
                "Complete missions and earn rewards",
            ),
            Role::Auditor => ("Audit Overview", "Review compliance status and evidence"),
        };
        let (missions_heading, mission_count) = match role {
            Role::Employee => ("Active Missions", 3),
            _ => ("Recent Activities", 2),
        };
        let show_insights = role != Role::Auditor;

        Self {
            title,
            subtitle,
            stats: catalog::quick_stats(role),
            score: ComplianceScore::default(),
            missions_heading,
            missions: catalog::missions().into_iter().take(mission_count).collect(),
            next_steps: if show_insights { NEXT_STEPS.to_vec() } else { Vec::new() },
            achievements: if show_insights { ACHIEVEMENTS.to_vec() } else { Vec::new() },
        }
    }

    pub fn shows_insights(&self) -> bool {
        !self.next_steps.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyView {
    pub progress: u8,
    pub prediction: &'static str,
    pub badges: Vec<&'static str>,
    pub missions: Vec<Mission>,
}

impl Default for JourneyView {
    fn default() -> Self {
        Self {
            progress: JOURNEY_PROGRESS,
            prediction: AUDIT_PREDICTION,
            badges: JOURNEY_BADGES.to_vec(),
            missions: catalog::missions().into_iter().take(1).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_varies_by_role() {
        let employee = Overview::for_role(Role::Employee);
        assert_eq!(employee.title, "My Compliance Missions");
        assert_eq!(employee.missions_heading, "Active Missions");
        assert_eq!(employee.missions.len(), 3);

        let admin = Overview::for_role(Role::Admin);
        assert_eq!(admin.missions.len(), 2);
        assert!(admin.shows_insights());
        assert_eq!(admin.stats[1].label, "Team Members");

        let auditor = Overview::for_role(Role::Auditor);
        assert!(!auditor.shows_insights());
        assert_eq!(auditor.stats[2].value, "78%");
    }
}
