//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::UserInterfaceController;

/// Queues `cmd`; a command that cannot be queued is handed back to the controller.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    controller: &mut UserInterfaceController,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(cmd)) => {
            tracing::warn!(command = cmd_name, "ui command queue is full");
            controller.command_rejected(&cmd, "UI command queue is full; please retry");
        }
        Err(TrySendError::Disconnected(cmd)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            controller.command_rejected(
                &cmd,
                "Backend command processor disconnected (possible startup/runtime failure)",
            );
        }
    }
}
