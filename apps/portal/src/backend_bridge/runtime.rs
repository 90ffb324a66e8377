//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use portal_core::{register, AuthBackend};
use tracing::{error, info};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{UiError, UiErrorContext, UiEvent},
};

/// Spawns the worker thread. It exits when the command sender is dropped.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    backend: Arc<dyn AuthBackend>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!(error = %err, "failed to build backend runtime");
                let _ = ui_tx.send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                return;
            }
        };

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::SignUp {
                    submission,
                    registration,
                } => {
                    let result = runtime.block_on(register(backend.as_ref(), &registration));
                    if ui_tx
                        .send(UiEvent::SignupFinished { submission, result })
                        .is_err()
                    {
                        break;
                    }
                }
            }
        }
        info!("backend worker stopped");
    })
}
