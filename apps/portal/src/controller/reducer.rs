//! Applies parsed actions to the portal session.

use portal_core::{
    BackOutcome, DashboardState, PortalError, PortalSession, Registration, StepOutcome,
};
use shared::domain::Section;

use crate::controller::input::Action;

#[derive(Debug)]
pub enum Effect {
    None,
    Notice(String),
    /// Validated form, ready to be queued for the worker.
    SignUp(Registration),
    Quit,
}

pub fn apply(session: &mut PortalSession, action: Action) -> Result<Effect, PortalError> {
    let effect = match action {
        Action::Help => Effect::Notice(crate::controller::input::HELP.to_string()),
        Action::Quit => Effect::Quit,
        Action::GetStarted => {
            session.get_started()?;
            Effect::None
        }
        Action::SelectRole(role) => {
            session.select_role(role)?;
            Effect::Notice(format!("Signed in as {}", role.label()))
        }
        Action::LoginRole(role) => {
            session.login.role = Some(role);
            Effect::None
        }
        Action::LoginEmail(email) => {
            session.login.email = email;
            Effect::None
        }
        Action::LoginPassword(password) => {
            session.login.password = password;
            Effect::None
        }
        Action::LoginShowPassword(show) => {
            session.login.show_password = show;
            Effect::None
        }
        Action::Login => {
            let role = session.sign_in()?;
            Effect::Notice(format!("Signed in as {}", role.label()))
        }
        Action::Logout => {
            session.logout();
            Effect::None
        }
        Action::Go(section) => {
            session.select_section(section)?;
            Effect::None
        }
        Action::ChatOpen => {
            session.dashboard_mut()?.assistant.open();
            Effect::None
        }
        Action::ChatClose => {
            session.dashboard_mut()?.assistant.close();
            Effect::None
        }
        Action::Ask(text) => {
            let assistant = &mut session.dashboard_mut()?.assistant;
            assistant.open();
            match assistant.send(&text) {
                Some(_) => Effect::None,
                None => Effect::Notice("Type a message first".to_string()),
            }
        }
        Action::SignupOpen => {
            session.open_signup()?;
            Effect::None
        }
        Action::SignupClose => {
            session.close_signup();
            Effect::None
        }
        Action::SignupEmail(email) => {
            require_signup(session)?;
            session.signup.email = email;
            Effect::None
        }
        Action::SignupPassword(password) => {
            require_signup(session)?;
            session.signup.password = password;
            Effect::None
        }
        Action::EarlyAdopter(flag) => {
            require_signup(session)?;
            session.signup.is_early_adopter = flag;
            Effect::None
        }
        Action::SignupSubmit => {
            require_signup(session)?;
            match session.signup.begin_submit() {
                Ok(registration) => Effect::SignUp(registration),
                Err(failure) => Effect::Notice(failure.to_string()),
            }
        }
        Action::SetupOpen => {
            in_section(session, Section::Settings)?.open_setup()?;
            Effect::None
        }
        Action::SetupClose => {
            in_section(session, Section::Settings)?.close_setup();
            Effect::None
        }
        Action::SetupName(name) => {
            in_section(session, Section::Settings)?.setup_form_mut()?.company_name = name;
            Effect::None
        }
        Action::SetupType(kind) => {
            in_section(session, Section::Settings)?.setup_form_mut()?.company_type = Some(kind);
            Effect::None
        }
        Action::SetupSearch(term) => {
            in_section(session, Section::Settings)?.setup_form_mut()?.search_term = term;
            Effect::None
        }
        Action::SetupToggle(framework) => {
            in_section(session, Section::Settings)?
                .setup_form_mut()?
                .toggle_framework(framework);
            Effect::None
        }
        Action::SetupInviteAdd => {
            in_section(session, Section::Settings)?
                .setup_form_mut()?
                .invites
                .push_empty();
            Effect::None
        }
        Action::SetupInvite { index, email, role } => {
            let invites = &mut in_section(session, Section::Settings)?.setup_form_mut()?.invites;
            invites.set_email(index, email)?;
            invites.set_role(index, role)?;
            Effect::None
        }
        Action::Next => {
            let dashboard = session.dashboard_mut()?;
            let in_setup = dashboard.active_setup().is_some();
            match dashboard.next()? {
                StepOutcome::Advanced(step) => Effect::Notice(format!("Step {step} of 3")),
                StepOutcome::Completed if in_setup => {
                    Effect::Notice(portal_core::setup::SETUP_COMPLETION_BADGE.to_string())
                }
                StepOutcome::Completed => Effect::Notice("Policy approved".to_string()),
                StepOutcome::Blocked => {
                    Effect::Notice("Complete this step before continuing".to_string())
                }
                StepOutcome::Terminated => Effect::None,
            }
        }
        Action::Back => match session.dashboard_mut()?.back()? {
            BackOutcome::SteppedBack(step) => Effect::Notice(format!("Step {step} of 3")),
            BackOutcome::AtFirstStep | BackOutcome::Terminated => Effect::None,
        },
        Action::PolicyNew => {
            let dashboard = in_section(session, Section::Policies)?;
            dashboard.policies.open_new_policy()?;
            Effect::None
        }
        Action::PolicyCancel => {
            in_section(session, Section::Policies)?.policies.cancel();
            Effect::None
        }
        Action::PolicyFramework(framework) => {
            let form = in_section(session, Section::Policies)?
                .policies
                .flow_form_mut()?;
            form.framework = Some(framework);
            Effect::None
        }
        Action::PolicyPrompt(prompt) => {
            let form = in_section(session, Section::Policies)?
                .policies
                .flow_form_mut()?;
            form.prompt = prompt;
            Effect::None
        }
        Action::PolicyEdit(text) => {
            let form = in_section(session, Section::Policies)?
                .policies
                .flow_form_mut()?;
            form.edited = text;
            Effect::None
        }
        Action::PolicyFilter(filter) => {
            in_section(session, Section::Policies)?.policies.filter = filter;
            Effect::None
        }
        Action::EvidenceUpload => {
            in_section(session, Section::Evidence)?
                .evidence
                .open_upload()?;
            Effect::None
        }
        Action::EvidenceAdd(name) => {
            in_section(session, Section::Evidence)?
                .evidence
                .stage_file(name)?;
            Effect::None
        }
        Action::EvidenceCancel => {
            in_section(session, Section::Evidence)?
                .evidence
                .cancel_upload();
            Effect::None
        }
        Action::EvidenceApprove => {
            let files = in_section(session, Section::Evidence)?
                .evidence
                .approve_upload()?;
            Effect::Notice(format!("{} evidence file(s) approved", files.len()))
        }
        Action::InviteAdd => {
            in_section(session, Section::Settings)?
                .team
                .invites
                .push_empty();
            Effect::None
        }
        Action::Invite { index, email, role } => {
            let invites = &mut in_section(session, Section::Settings)?.team.invites;
            invites.set_email(index, email)?;
            invites.set_role(index, role)?;
            Effect::None
        }
        Action::InviteSend => {
            let sent = in_section(session, Section::Settings)?
                .team
                .send_invites()?;
            Effect::Notice(format!("Sent {} invite(s)", sent.len()))
        }
    };
    Ok(effect)
}

fn require_signup(session: &PortalSession) -> Result<(), PortalError> {
    if session.signup_open() {
        Ok(())
    } else {
        Err(PortalError::NoActiveFlow("edit sign-up"))
    }
}

/// Dashboard state, provided `section` is the one showing.
fn in_section(
    session: &mut PortalSession,
    section: Section,
) -> Result<&mut DashboardState, PortalError> {
    let dashboard = session.dashboard_mut()?;
    if dashboard.sections.section() != section {
        return Err(PortalError::Incomplete(match section {
            Section::Policies => "open the Policies section first",
            Section::Evidence => "open the Evidence section first",
            Section::Settings => "open the Settings section first",
            _ => "open that section first",
        }));
    }
    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use shared::domain::{Role, View};

    use super::*;
    use crate::controller::input::parse;

    fn run(session: &mut PortalSession, lines: &[&str]) -> Vec<Result<Effect, PortalError>> {
        lines
            .iter()
            .map(|line| {
                let action = parse(line).expect("parse").expect("action");
                apply(session, action)
            })
            .collect()
    }

    #[test]
    fn policy_draft_is_filed_from_the_policies_section() {
        let mut session = PortalSession::new();
        let results = run(
            &mut session,
            &[
                "start",
                "role employee",
                "go policies",
                "policy-new",
                "policy-framework soc2",
                "next",
                "policy-prompt Password rotation",
                "next",
                "next",
            ],
        );
        assert!(results.iter().all(Result::is_ok));
        assert!(matches!(
            results.last(),
            Some(Ok(Effect::Notice(text))) if text == "Policy approved"
        ));
        let dashboard = session.dashboard().expect("dashboard");
        assert!(dashboard
            .policies
            .visible_policies()
            .any(|policy| policy.title == "Password rotation"));
    }

    #[test]
    fn section_scoped_actions_need_their_section() {
        let mut session = PortalSession::new();
        run(&mut session, &["start", "role admin"]);
        let err = apply(&mut session, Action::EvidenceUpload).expect_err("wrong section");
        assert_eq!(err.to_string(), "open the Evidence section first");
    }

    #[test]
    fn rejected_actions_keep_state() {
        let mut session = PortalSession::new();
        run(&mut session, &["start", "role auditor"]);
        let err = apply(&mut session, Action::Go(Section::Risk)).expect_err("admin only");
        assert!(matches!(err, PortalError::SectionNotPermitted { .. }));
        assert_eq!(session.view(), View::Dashboard);
        assert_eq!(session.role(), Some(Role::Auditor));
        assert_eq!(
            session.dashboard().expect("dashboard").sections.section(),
            Section::Dashboard
        );
    }

    #[test]
    fn submit_dispatches_only_valid_forms() {
        let mut session = PortalSession::new();
        run(&mut session, &["signup"]);
        let effect = apply(&mut session, Action::SignupSubmit).expect("inline error");
        assert!(matches!(effect, Effect::Notice(text) if text == "Email is required"));

        run(
            &mut session,
            &["signup-email new@acme.test", "signup-password pw", "early-adopter on"],
        );
        let effect = apply(&mut session, Action::SignupSubmit).expect("dispatch");
        let Effect::SignUp(registration) = effect else {
            panic!("expected dispatch");
        };
        assert!(registration.is_early_adopter);
        assert!(session.signup.is_loading());
    }

    #[test]
    fn next_goes_to_the_flow_in_the_active_section() {
        let mut session = PortalSession::new();
        let results = run(
            &mut session,
            &[
                "start",
                "role admin",
                "go settings",
                "setup",
                "go policies",
                "policy-new",
                "policy-framework gdpr",
                "next",
            ],
        );
        assert!(results.iter().all(Result::is_ok));
        assert!(matches!(
            results.last(),
            Some(Ok(Effect::Notice(text))) if text == "Step 2 of 3"
        ));
        let err = apply(&mut session, Action::SetupName("Acme".into())).expect_err("not here");
        assert_eq!(err.to_string(), "open the Settings section first");

        run(&mut session, &["go settings", "setup-name Acme Pay"]);
        let dashboard = session.dashboard().expect("dashboard");
        assert_eq!(dashboard.setup().expect("setup").step(), 1);
        assert_eq!(dashboard.policies.flow().expect("policy").step(), 2);
    }

    #[test]
    fn company_setup_awards_badge() {
        let mut session = PortalSession::new();
        let results = run(
            &mut session,
            &[
                "start",
                "role admin",
                "go settings",
                "setup",
                "setup-name Acme Pay",
                "setup-type fintech",
                "next",
                "setup-toggle GDPR",
                "next",
                "setup-invite 1 ciso@acme.test admin",
                "next",
            ],
        );
        assert!(results.iter().all(Result::is_ok));
        let dashboard = session.dashboard().expect("dashboard");
        assert!(dashboard.setup().is_none());
        assert_eq!(dashboard.badges(), &[portal_core::setup::SETUP_COMPLETION_BADGE]);
    }
}
