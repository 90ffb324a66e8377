//! Portal state machines, sample catalogs and the sign-up client.

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod evidence;
pub mod invites;
pub mod login;
pub mod navigation;
pub mod policies;
pub mod session;
pub mod setup;
pub mod signup;
pub mod wizard;

pub use assistant::Assistant;
pub use config::{load_settings, Settings};
pub use error::PortalError;
pub use invites::{InviteError, InviteList, TeamSettings};
pub use navigation::{navigation_for, NavItem, SectionRouter, ViewRouter};
pub use session::{DashboardState, PortalSession};
pub use signup::{
    backend_from_settings, register, AuthBackend, Registration, RegistrationOutcome,
    RestAuthBackend, SignupForm, UnconfiguredAuthBackend,
};
pub use wizard::{BackOutcome, StepOutcome, Wizard, WizardForm};
