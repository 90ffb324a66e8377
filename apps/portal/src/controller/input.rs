//! Line commands typed at the prompt.

use portal_core::policies::{PolicyFramework, PolicyStatus};
use shared::domain::{CompanyType, Framework, Role, Section};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Help,
    Quit,
    GetStarted,
    SelectRole(Role),
    LoginRole(Role),
    LoginEmail(String),
    LoginPassword(String),
    LoginShowPassword(bool),
    Login,
    Logout,
    Go(Section),
    ChatOpen,
    ChatClose,
    Ask(String),
    SignupOpen,
    SignupClose,
    SignupEmail(String),
    SignupPassword(String),
    EarlyAdopter(bool),
    SignupSubmit,
    SetupOpen,
    SetupClose,
    SetupName(String),
    SetupType(CompanyType),
    SetupSearch(String),
    SetupToggle(Framework),
    SetupInviteAdd,
    SetupInvite { index: usize, email: String, role: Role },
    Next,
    Back,
    PolicyNew,
    PolicyCancel,
    PolicyFramework(PolicyFramework),
    PolicyPrompt(String),
    PolicyEdit(String),
    PolicyFilter(Option<PolicyStatus>),
    EvidenceUpload,
    EvidenceAdd(String),
    EvidenceCancel,
    EvidenceApprove,
    InviteAdd,
    Invite { index: usize, email: String, role: Role },
    InviteSend,
}

pub const HELP: &str = "\
commands:
  start | role <admin|employee|auditor> | logout | quit | help
  login-role <role> | login-email <email> | login-password <pw> | login-show <on|off> | login
  go <section> | chat open|close | ask <text>
  signup | signup-close | signup-email <email> | signup-password <pw> | early-adopter <on|off> | submit
  setup | setup-close | setup-name <name> | setup-type <fintech|digital-bank|regulated>
  setup-search <text> | setup-toggle <SOC2|GDPR|PCI-DSS> | setup-invite-add | setup-invite <n> <email> <role>
  next | back
  policy-new | policy-cancel | policy-framework <soc2|gdpr> | policy-prompt <text> | policy-edit <text>
  policy-filter <approved|pending|all>
  evidence-upload | evidence-add <file> | evidence-cancel | evidence-approve
  invite-add | invite <n> <email> <role> | invite-send";

/// `Ok(None)` for blank lines and `#` comments.
pub fn parse(line: &str) -> Result<Option<Action>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let action = match command.to_ascii_lowercase().as_str() {
        "help" | "?" => Action::Help,
        "quit" | "exit" => Action::Quit,
        "start" => Action::GetStarted,
        "role" => Action::SelectRole(parse_value(rest)?),
        "login-role" => Action::LoginRole(parse_value(rest)?),
        "login-email" => Action::LoginEmail(rest.to_string()),
        "login-password" => Action::LoginPassword(rest.to_string()),
        "login-show" => Action::LoginShowPassword(parse_toggle(rest)?),
        "login" => Action::Login,
        "logout" => Action::Logout,
        "go" => Action::Go(parse_value(rest)?),
        "chat" => match rest.to_ascii_lowercase().as_str() {
            "open" => Action::ChatOpen,
            "close" => Action::ChatClose,
            other => return Err(format!("expected 'chat open' or 'chat close', got '{other}'")),
        },
        "ask" => Action::Ask(rest.to_string()),
        "signup" => Action::SignupOpen,
        "signup-close" => Action::SignupClose,
        "signup-email" => Action::SignupEmail(rest.to_string()),
        "signup-password" => Action::SignupPassword(rest.to_string()),
        "early-adopter" => Action::EarlyAdopter(parse_toggle(rest)?),
        "submit" => Action::SignupSubmit,
        "setup" => Action::SetupOpen,
        "setup-close" => Action::SetupClose,
        "setup-name" => Action::SetupName(rest.to_string()),
        "setup-type" => Action::SetupType(parse_value(rest)?),
        "setup-search" => Action::SetupSearch(rest.to_string()),
        "setup-toggle" => Action::SetupToggle(parse_value(rest)?),
        "setup-invite-add" => Action::SetupInviteAdd,
        "setup-invite" => {
            let (index, email, role) = parse_invite(rest)?;
            Action::SetupInvite { index, email, role }
        }
        "next" => Action::Next,
        "back" => Action::Back,
        "policy-new" => Action::PolicyNew,
        "policy-cancel" => Action::PolicyCancel,
        "policy-framework" => Action::PolicyFramework(parse_value(rest)?),
        "policy-prompt" => Action::PolicyPrompt(rest.to_string()),
        "policy-edit" => Action::PolicyEdit(rest.to_string()),
        "policy-filter" => Action::PolicyFilter(if rest.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(parse_value(rest)?)
        }),
        "evidence-upload" => Action::EvidenceUpload,
        "evidence-add" => Action::EvidenceAdd(require(rest, "a file name")?),
        "evidence-cancel" => Action::EvidenceCancel,
        "evidence-approve" => Action::EvidenceApprove,
        "invite-add" => Action::InviteAdd,
        "invite" => {
            let (index, email, role) = parse_invite(rest)?;
            Action::Invite { index, email, role }
        }
        "invite-send" => Action::InviteSend,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(Some(action))
}

fn parse_value<T>(raw: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|err| err.to_string())
}

fn parse_toggle(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        other => Err(format!("expected on or off, got '{other}'")),
    }
}

fn require(raw: &str, what: &str) -> Result<String, String> {
    if raw.is_empty() {
        Err(format!("missing {what}"))
    } else {
        Ok(raw.to_string())
    }
}

/// `<n> <email> <role>`, with `n` counted from 1 as displayed.
fn parse_invite(raw: &str) -> Result<(usize, String, Role), String> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    let [index, email, role] = parts.as_slice() else {
        return Err("expected <n> <email> <role>".to_string());
    };
    let index: usize = index
        .parse()
        .map_err(|_| format!("invalid invite number '{index}'"))?;
    if index == 0 {
        return Err("invite numbers start at 1".to_string());
    }
    Ok((index - 1, email.to_string(), parse_value(role)?))
}
