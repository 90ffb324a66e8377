//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd`; on failure the returned text is meant for the status line.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("UI command queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => Err(
            "Backend command processor disconnected (possible startup/runtime failure); sign-up is unavailable"
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use portal_core::Registration;

    use super::*;
    use crate::backend_bridge::commands::SubmissionId;

    fn sign_up() -> BackendCommand {
        BackendCommand::SignUp {
            submission: SubmissionId(1),
            registration: Registration {
                email: "a@b.co".into(),
                password: "pw".into(),
                is_early_adopter: false,
            },
        }
    }

    #[test]
    fn reports_full_and_disconnected_queues() {
        let (tx, rx) = bounded(1);
        dispatch_backend_command(&tx, sign_up()).expect("queued");
        let err = dispatch_backend_command(&tx, sign_up()).expect_err("full");
        assert!(err.contains("full"));

        drop(rx);
        let err = dispatch_backend_command(&tx, sign_up()).expect_err("disconnected");
        assert!(err.contains("disconnected"));
    }
}
