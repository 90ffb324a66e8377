//! Bridge between the UI thread and the async sign-up worker.

pub mod commands;
pub mod runtime;
