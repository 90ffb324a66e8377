//! Plain-text rendering of the current screen.

use portal_core::{
    catalog::{self, INTEGRATIONS},
    dashboard::Overview,
    setup::CompanySetupForm,
    DashboardState, InviteList, PortalSession, Wizard, WizardForm,
};
use shared::domain::{Mission, Section, View};

pub fn render(session: &PortalSession, status: &str) -> String {
    let mut out = String::new();
    match session.view() {
        View::Hero => render_hero(&mut out, session),
        View::Roles => render_roles(&mut out, session),
        View::Dashboard => {
            if let Some(dashboard) = session.dashboard() {
                render_dashboard(&mut out, dashboard);
            }
        }
    }
    if !status.is_empty() {
        line(&mut out, format!("\n» {status}"));
    }
    out
}

fn line(out: &mut String, text: impl AsRef<str>) {
    out.push_str(text.as_ref());
    out.push('\n');
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn incomplete_hint(ready: bool) -> &'static str {
    if ready {
        ""
    } else {
        " (incomplete)"
    }
}

fn render_hero(out: &mut String, session: &PortalSession) {
    line(out, "== Charter ==");
    line(out, "Compliance, gamified. Policies, evidence and audits in one place.");
    line(out, "[start] Get Started    [signup] Join the early adopter list");

    if !session.signup_open() {
        return;
    }
    let form = &session.signup;
    line(out, "\n-- Join Charter --");
    line(out, format!("email:    {}", form.email));
    line(out, format!("password: {}", "•".repeat(form.password.chars().count())));
    line(
        out,
        format!("{} Early adopter (15% discount)", checkbox(form.is_early_adopter)),
    );
    if let Some(error) = form.error() {
        line(out, format!("! {error}"));
    }
    if let Some(notice) = form.notice() {
        line(out, format!("✓ {notice}"));
    }
    line(out, format!("[submit] {}", form.button_label()));
}

fn render_roles(out: &mut String, session: &PortalSession) {
    line(out, "== Choose your role ==");
    for card in catalog::role_cards() {
        line(
            out,
            format!("[role {}] {}: {}", card.role.as_str(), card.title, card.description),
        );
        line(out, format!("    {}", card.features.join(" · ")));
    }

    let login = &session.login;
    let role = login.role.map(|role| role.label()).unwrap_or("(none)");
    line(out, "\n-- Sign in --");
    line(out, format!("role: {role}"));
    line(out, format!("email: {}", login.email));
    line(out, format!("password: {}", login.masked_password()));
    line(
        out,
        format!(
            "[login] {}{}",
            login.button_label(),
            incomplete_hint(login.can_submit())
        ),
    );
}

fn render_dashboard(out: &mut String, dashboard: &DashboardState) {
    let active = dashboard.sections.section();
    line(out, format!("== Charter · {} ==  [logout]", dashboard.role().label()));

    let sidebar: Vec<String> = dashboard
        .nav_items()
        .into_iter()
        .map(|item| {
            if item.section == active {
                format!("▶ {}", item.label)
            } else {
                item.label.to_string()
            }
        })
        .collect();
    line(out, sidebar.join(" | "));
    for badge in dashboard.badges() {
        line(out, format!("🏆 {badge}"));
    }
    out.push('\n');

    match active {
        Section::Dashboard => render_overview(out, &dashboard.overview()),
        Section::Policies => render_policies(out, dashboard),
        Section::Evidence => render_evidence(out, dashboard),
        Section::Journey => render_journey(out, dashboard),
        Section::Settings => match dashboard.active_setup() {
            Some(setup) => render_setup(out, setup),
            None => render_settings(out, dashboard),
        },
        Section::Integrations => {
            line(out, "-- Integrations --");
            for name in INTEGRATIONS {
                line(out, format!("  {name}  [Connect]"));
            }
        }
        other => {
            line(out, format!("-- {} --", other.label()));
            line(out, "Coming soon.");
        }
    }

    if dashboard.assistant.is_open() {
        line(out, "\n-- Charter AI --");
        for message in dashboard.assistant.messages() {
            let who = if message.is_user { "you" } else { "ai" };
            line(
                out,
                format!(
                    "[{}] {who}: {}",
                    message.timestamp.format("%H:%M"),
                    message.content
                ),
            );
        }
    }
}

fn render_overview(out: &mut String, overview: &Overview) {
    line(out, format!("-- {} --", overview.title));
    line(out, overview.subtitle);
    for stat in &overview.stats {
        line(out, format!("  {}: {}", stat.label, stat.value));
    }
    line(
        out,
        format!(
            "Compliance score: {}% ({}, {})",
            overview.score.score,
            overview.score.status().label(),
            overview.score.trend
        ),
    );
    line(out, format!("\n{}", overview.missions_heading));
    for mission in &overview.missions {
        render_mission(out, mission);
    }
    if overview.shows_insights() {
        line(out, "\nNext steps");
        for step in &overview.next_steps {
            line(out, format!("  • {step}"));
        }
        line(out, "Achievements");
        for achievement in &overview.achievements {
            line(out, format!("  • {achievement}"));
        }
    }
}

fn render_mission(out: &mut String, mission: &Mission) {
    let mut text = format!(
        "  {} ({:?}) - {}",
        mission.title, mission.difficulty, mission.reward
    );
    if let Some(time) = &mission.estimated_time {
        text.push_str(&format!(", {time}"));
    }
    if mission.shows_progress() {
        text.push_str(&format!(", {}%", mission.progress));
    }
    line(out, format!("{text}  [{}]", mission.action_label()));
}

fn render_policies(out: &mut String, dashboard: &DashboardState) {
    let desk = &dashboard.policies;
    if let Some(flow) = desk.flow() {
        render_wizard_header(out, "New Policy", flow);
        let form = flow.form();
        match flow.step() {
            1 => {
                let framework = form
                    .framework
                    .map(|fw| fw.label())
                    .unwrap_or("(choose soc2 or gdpr)");
                line(out, format!("framework: {framework}"));
            }
            2 => line(out, format!("prompt: {}", form.prompt)),
            _ => line(out, form.policy_text()),
        }
        return;
    }

    line(out, "-- AI Policies --");
    let filter = desk.filter.map(|status| status.to_string());
    line(out, format!("filter: {}", filter.as_deref().unwrap_or("all")));
    for policy in desk.visible_policies() {
        line(
            out,
            format!("  {} [{}] {}", policy.title, policy.framework, policy.status),
        );
    }
    if desk.can_create() {
        line(out, "[policy-new] New Policy");
    }
}

fn render_evidence(out: &mut String, dashboard: &DashboardState) {
    let desk = &dashboard.evidence;
    line(out, "-- Evidence --");
    for control in catalog::controls() {
        line(
            out,
            format!(
                "  {} {}: {} (evidence {})",
                control.id, control.description, control.status, control.evidence
            ),
        );
    }
    line(out, format!("Integrations: {}", INTEGRATIONS.join(", ")));
    if desk.upload_open() {
        line(out, "\nUpload evidence");
        for file in desk.staged_files() {
            line(out, format!("  + {file}"));
        }
        line(out, "[evidence-cancel] Cancel  [evidence-approve] Approve");
    } else if desk.can_upload() {
        line(out, "[evidence-upload] Upload Evidence");
    }
}

fn render_journey(out: &mut String, dashboard: &DashboardState) {
    let journey = dashboard.journey();
    line(out, "-- Compliance Journey --");
    line(out, format!("Progress: {}%", journey.progress));
    line(out, journey.prediction);
    line(out, format!("Badges: {}", journey.badges.join(", ")));
    for mission in &journey.missions {
        render_mission(out, mission);
    }
}

fn render_settings(out: &mut String, dashboard: &DashboardState) {
    let team = &dashboard.team;
    line(out, "-- Team Settings --");
    render_invites(out, &team.invites);
    line(
        out,
        format!(
            "[invite-add] Add  [invite-send] Send Invites{}",
            incomplete_hint(team.can_send())
        ),
    );
    if !team.sent().is_empty() {
        line(out, "Sent:");
        for invite in team.sent() {
            let role = invite.role.map(|role| role.label()).unwrap_or("?");
            line(out, format!("  {} ({role})", invite.email));
        }
    }
    line(out, "[setup] Company setup");
}

fn render_invites(out: &mut String, invites: &InviteList) {
    for (index, invite) in invites.iter().enumerate() {
        let role = invite.role.map(|role| role.label()).unwrap_or("(role)");
        let email = if invite.email.is_empty() {
            "(email)"
        } else {
            invite.email.as_str()
        };
        line(out, format!("  {}. {email} {role}", index + 1));
    }
}

fn render_setup(out: &mut String, setup: &Wizard<CompanySetupForm>) {
    render_wizard_header(out, "Company Setup", setup);
    let form = setup.form();
    match setup.step() {
        1 => {
            let kind = form
                .company_type
                .map(|kind| kind.label())
                .unwrap_or("(choose)");
            line(out, format!("name: {}", form.company_name));
            line(out, format!("type: {kind}"));
        }
        2 => {
            line(out, format!("search: {}", form.search_term));
            for framework in form.visible_frameworks() {
                line(
                    out,
                    format!(
                        "  {} {}: {}",
                        checkbox(form.is_selected(framework)),
                        framework.name(),
                        framework.description()
                    ),
                );
            }
        }
        _ => render_invites(out, &form.invites),
    }
}

fn render_wizard_header<F: WizardForm>(out: &mut String, name: &str, wizard: &Wizard<F>) {
    line(
        out,
        format!(
            "-- {name}: step {} of 3, {} ({}%) --",
            wizard.step(),
            wizard.step_title(),
            wizard.progress_percent()
        ),
    );
    let back = if wizard.can_go_back() { "[back] Back  " } else { "" };
    line(
        out,
        format!(
            "{back}[next] {}{}",
            wizard.next_label(),
            incomplete_hint(wizard.can_advance())
        ),
    );
}

#[cfg(test)]
mod tests {
    use shared::domain::Role;

    use super::*;

    #[test]
    fn sidebar_marks_active_section() {
        let mut session = PortalSession::new();
        session.get_started().expect("start");
        session.select_role(Role::Employee).expect("role");
        session.select_section(Section::Journey).expect("journey");

        let screen = render(&session, "");
        assert!(screen.contains("▶ Compliance Journey"));
        assert!(!screen.contains("Risk Management"));
        assert!(screen.contains("Progress: 80%"));
    }

    #[test]
    fn hero_shows_signup_form_when_open() {
        let mut session = PortalSession::new();
        assert!(!render(&session, "").contains("Join Charter"));
        session.open_signup().expect("open");
        session.signup.password = "abc".into();
        let screen = render(&session, "hello");
        assert!(screen.contains("-- Join Charter --"));
        assert!(screen.contains("password: •••"));
        assert!(screen.contains("[ ] Early adopter"));
        assert!(screen.contains("[submit] Join Now"));
        assert!(screen.ends_with("» hello\n"));
    }

    #[test]
    fn setup_wizard_only_shows_under_settings() {
        let mut session = PortalSession::new();
        session.get_started().expect("start");
        session.select_role(Role::Admin).expect("role");
        session.select_section(Section::Settings).expect("settings");
        session
            .dashboard_mut()
            .expect("dashboard")
            .open_setup()
            .expect("setup");
        assert!(render(&session, "").contains("-- Company Setup: step 1 of 3"));

        session.select_section(Section::Policies).expect("policies");
        let screen = render(&session, "");
        assert!(!screen.contains("Company Setup"));
        assert!(screen.contains("-- AI Policies --"));
    }
}
