//! Company onboarding: details, frameworks, team.

use shared::domain::{CompanyType, Framework};

use crate::{invites::InviteList, wizard::WizardForm};

pub const SETUP_COMPLETION_BADGE: &str = "Badge Unlocked: Compliance Pioneer!";

#[derive(Debug, Clone, Default)]
pub struct CompanySetupForm {
    pub company_name: String,
    pub company_type: Option<CompanyType>,
    pub search_term: String,
    pub invites: InviteList,
    frameworks: Vec<Framework>,
}

impl CompanySetupForm {
    pub fn frameworks(&self) -> &[Framework] {
        &self.frameworks
    }

    pub fn is_selected(&self, framework: Framework) -> bool {
        self.frameworks.contains(&framework)
    }

    /// Selects or deselects; selection order is kept.
    pub fn toggle_framework(&mut self, framework: Framework) -> bool {
        if let Some(pos) = self.frameworks.iter().position(|fw| *fw == framework) {
            self.frameworks.remove(pos);
            false
        } else {
            self.frameworks.push(framework);
            true
        }
    }

    /// Frameworks whose name contains the search term, ignoring case.
    pub fn visible_frameworks(&self) -> Vec<Framework> {
        let needle = self.search_term.to_lowercase();
        Framework::ALL
            .into_iter()
            .filter(|fw| fw.name().to_lowercase().contains(&needle))
            .collect()
    }
}

impl WizardForm for CompanySetupForm {
    fn step_complete(&self, step: u8) -> bool {
        match step {
            1 => !self.company_name.is_empty() && self.company_type.is_some(),
            2 => !self.frameworks.is_empty(),
            3 => self.invites.is_complete(),
            _ => true,
        }
    }

    fn step_title(&self, step: u8) -> &'static str {
        match step {
            1 => "Company",
            2 => "Frameworks",
            _ => "Team",
        }
    }

    fn finish_label(&self) -> &'static str {
        "Finish"
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::Role;

    use super::*;
    use crate::wizard::{StepOutcome, Wizard};

    #[test]
    fn search_filters_frameworks_case_insensitively() {
        let mut form = CompanySetupForm::default();
        assert_eq!(form.visible_frameworks().len(), 3);
        form.search_term = "dS".into();
        assert_eq!(form.visible_frameworks(), vec![Framework::PciDss]);
        form.search_term = "zzz".into();
        assert!(form.visible_frameworks().is_empty());
    }

    #[test]
    fn toggle_flips_selection() {
        let mut form = CompanySetupForm::default();
        assert!(form.toggle_framework(Framework::Gdpr));
        assert!(form.toggle_framework(Framework::Soc2));
        assert_eq!(form.frameworks(), &[Framework::Gdpr, Framework::Soc2]);
        assert!(!form.toggle_framework(Framework::Gdpr));
        assert_eq!(form.frameworks(), &[Framework::Soc2]);
    }

    #[test]
    fn each_step_is_gated() {
        let mut wizard = Wizard::new(CompanySetupForm::default());
        assert_eq!(wizard.next(), StepOutcome::Blocked);

        let form = wizard.form_mut().expect("open");
        form.company_name = "Acme Pay".into();
        assert!(!wizard.can_advance());
        wizard.form_mut().expect("open").company_type = Some(CompanyType::Fintech);
        assert_eq!(wizard.next(), StepOutcome::Advanced(2));
        assert_eq!(wizard.step_title(), "Frameworks");

        assert_eq!(wizard.next(), StepOutcome::Blocked);
        wizard
            .form_mut()
            .expect("open")
            .toggle_framework(Framework::Soc2);
        assert_eq!(wizard.next(), StepOutcome::Advanced(3));
        assert_eq!(wizard.next_label(), "Finish");

        assert_eq!(wizard.next(), StepOutcome::Blocked);
        let invites = &mut wizard.form_mut().expect("open").invites;
        invites.set_email(0, "ciso@acme.test").expect("email");
        invites.set_role(0, Role::Admin).expect("role");
        invites.push_empty();
        assert_eq!(wizard.next(), StepOutcome::Blocked);
        let invites = &mut wizard.form_mut().expect("open").invites;
        invites.set_email(1, "eng@acme.test").expect("email");
        invites.set_role(1, Role::Employee).expect("role");
        assert_eq!(wizard.next(), StepOutcome::Completed);
    }
}
