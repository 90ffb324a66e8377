//! Text front end: app loop and screen rendering.

pub mod app;
pub mod render;

pub use app::PortalApp;
