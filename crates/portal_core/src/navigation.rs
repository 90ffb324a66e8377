//! Top-level view routing and the role-gated dashboard sidebar.

use shared::domain::{Role, Section, View};
use tracing::debug;

use crate::{error::PortalError, login::LoginForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub section: Section,
    pub label: &'static str,
}

/// Sidebar entries visible to `role`, in display order.
pub fn navigation_for(role: Role) -> Vec<NavItem> {
    Section::ALL
        .into_iter()
        .filter(|section| section.permitted_for(role))
        .map(|section| NavItem {
            section,
            label: section.label(),
        })
        .collect()
}

/// Which screen is showing and which role was picked.
///
/// `role` is set exactly when `view` is [`View::Dashboard`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRouter {
    view: View,
    role: Option<Role>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn get_started(&mut self) -> Result<(), PortalError> {
        self.require(View::Hero, "get started")?;
        self.view = View::Roles;
        debug!(view = ?self.view, "view transition");
        Ok(())
    }

    pub fn select_role(&mut self, role: Role) -> Result<(), PortalError> {
        self.require(View::Roles, "select a role")?;
        self.role = Some(role);
        self.view = View::Dashboard;
        debug!(view = ?self.view, %role, "view transition");
        Ok(())
    }

    /// Signs in through the credentials form; behaves like choosing the form's role.
    pub fn sign_in(&mut self, form: &LoginForm) -> Result<Role, PortalError> {
        self.require(View::Roles, "sign in")?;
        let role = form
            .submit()
            .ok_or(PortalError::Incomplete("select a role and enter email and password"))?;
        self.select_role(role)?;
        Ok(role)
    }

    /// Returns to the hero screen from anywhere and forgets the role.
    pub fn logout(&mut self) {
        self.role = None;
        self.view = View::Hero;
        debug!(view = ?self.view, "view transition");
    }

    fn require(&self, view: View, action: &'static str) -> Result<(), PortalError> {
        if self.view == view {
            Ok(())
        } else {
            Err(PortalError::NotApplicable {
                action,
                view: self.view,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRouter {
    role: Role,
    section: Section,
}

impl SectionRouter {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            section: Section::Dashboard,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn items(&self) -> Vec<NavItem> {
        navigation_for(self.role)
    }

    pub fn select(&mut self, section: Section) -> Result<Section, PortalError> {
        if !section.permitted_for(self.role) {
            return Err(PortalError::SectionNotPermitted {
                section,
                role: self.role,
            });
        }
        self.section = section;
        debug!(%section, role = %self.role, "section selected");
        Ok(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(role: Role) -> Vec<&'static str> {
        navigation_for(role).iter().map(|item| item.section.id()).collect()
    }

    #[test]
    fn employee_sidebar_excludes_admin_sections() {
        let employee = ids(Role::Employee);
        for hidden in ["settings", "risk", "vendors", "controls", "assets", "integrations"] {
            assert!(!employee.contains(&hidden), "{hidden} leaked to employee");
        }
        assert!(employee.contains(&"training"));
        assert_eq!(employee, ids(Role::Auditor));
        assert_eq!(ids(Role::Admin).len(), Section::ALL.len());
    }

    #[test]
    fn view_router_cycles_through_screens() {
        let mut router = ViewRouter::new();
        assert_eq!(router.view(), View::Hero);
        assert!(router.select_role(Role::Admin).is_err());

        router.get_started().expect("get started");
        assert_eq!(router.view(), View::Roles);
        assert!(router.get_started().is_err());

        router.select_role(Role::Auditor).expect("role");
        assert_eq!(router.view(), View::Dashboard);
        assert_eq!(router.role(), Some(Role::Auditor));

        router.logout();
        assert_eq!(router, ViewRouter::new());
    }

    #[test]
    fn rejected_transition_leaves_state_alone() {
        let mut router = ViewRouter::new();
        let err = router.select_role(Role::Employee).expect_err("not on roles screen");
        assert_eq!(
            err,
            PortalError::NotApplicable {
                action: "select a role",
                view: View::Hero
            }
        );
        assert_eq!(router.view(), View::Hero);
        assert_eq!(router.role(), None);
    }

    #[test]
    fn section_router_rejects_forbidden_sections() {
        let mut sections = SectionRouter::new(Role::Employee);
        assert_eq!(sections.section(), Section::Dashboard);

        sections.select(Section::Journey).expect("journey");
        let err = sections.select(Section::Vendors).expect_err("admin only");
        assert!(matches!(err, PortalError::SectionNotPermitted { .. }));
        assert_eq!(sections.section(), Section::Journey);

        let mut admin = SectionRouter::new(Role::Admin);
        admin.select(Section::Vendors).expect("admin may");
    }
}
