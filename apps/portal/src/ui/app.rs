use std::{
    io::{BufRead, Write},
    time::Duration,
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use portal_core::{PortalSession, Registration};
use shared::error::SignupFailure;
use tracing::{debug, warn};

use crate::{
    backend_bridge::commands::{BackendCommand, SubmissionId},
    controller::{
        events::{UiError, UiErrorContext, UiEvent},
        input,
        orchestration::dispatch_backend_command,
        reducer::{self, Effect},
    },
    ui::render::render,
};

/// Line-driven front end. Owns the session; the worker owns the network.
pub struct PortalApp {
    session: PortalSession,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    wait: Duration,
    last_submission: u64,
    /// The only submission whose result is still applied to the form.
    pending: Option<SubmissionId>,
}

impl PortalApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, wait: Duration) -> Self {
        Self {
            session: PortalSession::new(),
            cmd_tx,
            ui_rx,
            status: String::new(),
            wait,
            last_submission: 0,
            pending: None,
        }
    }

    pub fn session(&self) -> &PortalSession {
        &self.session
    }

    /// Renders, reads a command, applies it. Returns on `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
        write!(out, "{}", render(&self.session, &self.status))?;
        for line in input.lines() {
            let line = line?;
            self.status.clear();
            if !self.handle_line(&line) {
                break;
            }
            self.await_signup();
            write!(out, "\n{}", render(&self.session, &self.status))?;
            out.flush()?;
        }
        Ok(())
    }

    /// False once the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        let action = match input::parse(line) {
            Ok(Some(action)) => action,
            Ok(None) => return true,
            Err(message) => {
                self.status = message;
                return true;
            }
        };
        debug!(?action, "applying action");

        match reducer::apply(&mut self.session, action) {
            Ok(Effect::None) => {}
            Ok(Effect::Notice(text)) => self.status = text,
            Ok(Effect::SignUp(registration)) => self.submit_signup(registration),
            Ok(Effect::Quit) => return false,
            Err(err) => {
                warn!(error = %err, "action rejected");
                self.status =
                    UiError::from_message(UiErrorContext::Navigation, err.to_string()).describe();
            }
        }
        true
    }

    fn submit_signup(&mut self, registration: Registration) {
        self.last_submission += 1;
        let submission = SubmissionId(self.last_submission);
        let cmd = BackendCommand::SignUp {
            submission,
            registration,
        };
        match dispatch_backend_command(&self.cmd_tx, cmd) {
            Ok(()) => self.pending = Some(submission),
            Err(message) => {
                warn!(%message, "backend dispatch failed");
                self.fail_signup(UiErrorContext::SignUp, message);
            }
        }
    }

    /// Gives up on the pending submission; a late result for it is dropped.
    fn fail_signup(&mut self, context: UiErrorContext, message: String) {
        self.pending = None;
        let failure = SignupFailure::Transport(message);
        self.status = UiError::from_failure(context, &failure).describe();
        self.session.signup.finish(Err(failure));
    }

    /// Input is sequential, so the next command waits for an in-flight sign-up.
    fn await_signup(&mut self) {
        while self.session.signup.is_loading() {
            match self.ui_rx.recv_timeout(self.wait) {
                Ok(event) => self.process_ui_event(event),
                Err(RecvTimeoutError::Timeout) => {
                    let message = format!("sign-up request timed out after {:?}", self.wait);
                    self.fail_signup(UiErrorContext::SignUp, message);
                }
                Err(RecvTimeoutError::Disconnected) => {
                    self.fail_signup(
                        UiErrorContext::BackendStartup,
                        "backend worker disconnected".to_string(),
                    );
                }
            }
        }
        while let Ok(event) = self.ui_rx.try_recv() {
            self.process_ui_event(event);
        }
    }

    fn process_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::SignupFinished { submission, result } => {
                if self.pending != Some(submission) {
                    debug!(?submission, "dropping result of an abandoned sign-up");
                    return;
                }
                self.pending = None;
                let failure = result
                    .as_ref()
                    .err()
                    .map(|failure| UiError::from_failure(UiErrorContext::SignUp, failure));
                let succeeded = self.session.signup.finish(result);
                if let Some(err) = failure {
                    self.status = err.describe();
                } else if let Some(notice) = self.session.signup.notice() {
                    self.status = notice.to_string();
                } else {
                    self.status = "Sign-up received; no account was returned yet".to_string();
                }
                if succeeded {
                    self.session.close_signup();
                }
            }
            UiEvent::Error(err) => {
                warn!(category = ?err.category(), message = err.message(), "backend error");
                if self.session.signup.is_loading() {
                    self.pending = None;
                    self.session
                        .signup
                        .finish(Err(SignupFailure::Transport(err.message().to_string())));
                }
                self.status = err.describe();
            }
        }
    }
}
