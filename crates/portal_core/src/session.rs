//! Whole-portal state: the view router plus per-screen state holders.

use shared::domain::{Role, Section, View};
use tracing::{debug, info};

use crate::{
    assistant::Assistant,
    dashboard::{JourneyView, Overview},
    error::PortalError,
    evidence::EvidenceDesk,
    invites::TeamSettings,
    login::LoginForm,
    navigation::{NavItem, SectionRouter, ViewRouter},
    policies::PolicyDesk,
    setup::{CompanySetupForm, SETUP_COMPLETION_BADGE},
    signup::SignupForm,
    wizard::{BackOutcome, StepOutcome, Wizard},
};

/// Everything that lives only while a role is signed in.
pub struct DashboardState {
    pub sections: SectionRouter,
    pub assistant: Assistant,
    pub policies: PolicyDesk,
    pub evidence: EvidenceDesk,
    pub team: TeamSettings,
    setup: Option<Wizard<CompanySetupForm>>,
    badges: Vec<String>,
}

impl DashboardState {
    pub fn new(role: Role) -> Self {
        Self {
            sections: SectionRouter::new(role),
            assistant: Assistant::new(),
            policies: PolicyDesk::new(role),
            evidence: EvidenceDesk::new(role),
            team: TeamSettings::default(),
            setup: None,
            badges: Vec::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.sections.role()
    }

    pub fn overview(&self) -> Overview {
        Overview::for_role(self.role())
    }

    pub fn journey(&self) -> JourneyView {
        JourneyView::default()
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        self.sections.items()
    }

    pub fn badges(&self) -> &[String] {
        &self.badges
    }

    pub fn setup(&self) -> Option<&Wizard<CompanySetupForm>> {
        self.setup.as_ref()
    }

    pub fn setup_form_mut(&mut self) -> Result<&mut CompanySetupForm, PortalError> {
        self.setup
            .as_mut()
            .and_then(Wizard::form_mut)
            .ok_or(PortalError::NoActiveFlow("edit"))
    }

    /// Company setup runs inside the Settings section.
    pub fn open_setup(&mut self) -> Result<(), PortalError> {
        if self.role() != Role::Admin {
            return Err(PortalError::NotPermitted {
                action: "run company setup",
                role: self.role(),
            });
        }
        if self.sections.section() != Section::Settings {
            return Err(PortalError::Incomplete("open the Settings section first"));
        }
        if self.setup.is_none() {
            let wizard = Wizard::new(CompanySetupForm::default()).with_completion(|form| {
                info!(
                    company = %form.company_name,
                    frameworks = form.frameworks().len(),
                    invites = form.invites.len(),
                    "company setup completed"
                );
            });
            self.setup = Some(wizard);
        }
        Ok(())
    }

    pub fn close_setup(&mut self) {
        self.setup = None;
    }

    /// Setup wizard shown in the active section, if any.
    pub fn active_setup(&self) -> Option<&Wizard<CompanySetupForm>> {
        if self.sections.section() == Section::Settings {
            self.setup.as_ref()
        } else {
            None
        }
    }

    /// Forward button of the flow shown in the active section.
    pub fn next(&mut self) -> Result<StepOutcome, PortalError> {
        match self.sections.section() {
            Section::Settings => {
                let wizard = self.setup.as_mut().ok_or(PortalError::NoActiveFlow("advance"))?;
                let outcome = wizard.next();
                if outcome == StepOutcome::Completed {
                    self.setup = None;
                    self.badges.push(SETUP_COMPLETION_BADGE.to_string());
                }
                Ok(outcome)
            }
            _ => {
                self.require_policy_flow("advance")?;
                self.policies.next()
            }
        }
    }

    pub fn back(&mut self) -> Result<BackOutcome, PortalError> {
        match self.sections.section() {
            Section::Settings => self
                .setup
                .as_mut()
                .map(Wizard::back)
                .ok_or(PortalError::NoActiveFlow("go back")),
            _ => {
                self.require_policy_flow("go back")?;
                self.policies.back()
            }
        }
    }

    fn require_policy_flow(&self, action: &'static str) -> Result<(), PortalError> {
        if self.sections.section() == Section::Policies && self.policies.flow().is_some() {
            Ok(())
        } else {
            Err(PortalError::NoActiveFlow(action))
        }
    }
}

#[derive(Default)]
pub struct PortalSession {
    router: ViewRouter,
    pub login: LoginForm,
    pub signup: SignupForm,
    signup_open: bool,
    dashboard: Option<DashboardState>,
}

impl PortalSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.router.view()
    }

    pub fn role(&self) -> Option<Role> {
        self.router.role()
    }

    pub fn dashboard(&self) -> Option<&DashboardState> {
        self.dashboard.as_ref()
    }

    pub fn dashboard_mut(&mut self) -> Result<&mut DashboardState, PortalError> {
        let view = self.router.view();
        self.dashboard.as_mut().ok_or(PortalError::NotApplicable {
            action: "use the dashboard",
            view,
        })
    }

    pub fn get_started(&mut self) -> Result<(), PortalError> {
        self.router.get_started()?;
        self.signup_open = false;
        Ok(())
    }

    pub fn select_role(&mut self, role: Role) -> Result<(), PortalError> {
        self.router.select_role(role)?;
        self.enter_dashboard(role);
        Ok(())
    }

    pub fn sign_in(&mut self) -> Result<Role, PortalError> {
        let role = self.router.sign_in(&self.login)?;
        self.login = LoginForm::default();
        self.enter_dashboard(role);
        Ok(role)
    }

    /// Back to the hero screen; all dashboard state is dropped.
    pub fn logout(&mut self) {
        self.router.logout();
        self.dashboard = None;
        self.login = LoginForm::default();
        info!("signed out");
    }

    pub fn select_section(&mut self, section: Section) -> Result<Section, PortalError> {
        self.dashboard_mut()?.sections.select(section)
    }

    pub fn signup_open(&self) -> bool {
        self.signup_open
    }

    /// The sign-up form is reached from the hero screen.
    pub fn open_signup(&mut self) -> Result<(), PortalError> {
        if self.router.view() != View::Hero {
            return Err(PortalError::NotApplicable {
                action: "open sign-up",
                view: self.router.view(),
            });
        }
        self.signup_open = true;
        Ok(())
    }

    pub fn close_signup(&mut self) {
        self.signup_open = false;
    }

    fn enter_dashboard(&mut self, role: Role) {
        self.dashboard = Some(DashboardState::new(role));
        debug!(%role, "dashboard opened");
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
