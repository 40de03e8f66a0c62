//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::UserCollection;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

/// Spawns the backend worker. Every command runs as its own task, so
/// completions may arrive in a different order than they were issued.
/// A completion waits for room in `ui_tx` and is only lost once the UI side
/// has hung up.
pub fn launch(
    collection: Arc<dyn UserCollection>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("user-admin-backend")
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.send(UiEvent::WorkerFailed(UiError::new(
                    UiErrorCategory::Transport,
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                return;
            }
        };
        tracing::info!("backend worker ready");

        while let Ok(cmd) = cmd_rx.recv() {
            let collection = Arc::clone(&collection);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                let cmd_name = cmd.name();
                let event = execute(collection.as_ref(), cmd).await;
                match tokio::task::spawn_blocking(move || ui_tx.send(event)).await {
                    Ok(Ok(())) => {}
                    Ok(Err(_)) => {
                        tracing::warn!(
                            command = cmd_name,
                            "ui event queue closed; completion dropped"
                        );
                    }
                    Err(err) => {
                        tracing::error!(
                            command = cmd_name,
                            "completion delivery task failed: {err}"
                        );
                    }
                }
            });
        }
        tracing::info!("ui command queue closed; backend worker stopping");
    })
}

/// Runs one command against the collection and maps the outcome to its completion event.
pub async fn execute(collection: &dyn UserCollection, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::ListUsers => {
            tracing::info!("backend: list_users");
            match collection.list().await {
                Ok(users) => UiEvent::UsersFetched(users),
                Err(err) => {
                    tracing::error!("backend: list_users failed: {err}");
                    UiEvent::FetchFailed(UiError::from_client(UiErrorContext::FetchUsers, &err))
                }
            }
        }
        BackendCommand::CreateUser { draft } => {
            tracing::info!("backend: create_user");
            match collection.create(&draft).await {
                Ok(user) => UiEvent::UserCreated(user),
                Err(err) => {
                    tracing::error!("backend: create_user failed: {err}");
                    UiEvent::CreateFailed(UiError::from_client(UiErrorContext::CreateUser, &err))
                }
            }
        }
        BackendCommand::DeleteUser { id } => {
            tracing::info!(user_id = id.0, "backend: delete_user");
            match collection.delete(id).await {
                Ok(()) => UiEvent::UserDeleted(id),
                Err(err) => {
                    tracing::error!(user_id = id.0, "backend: delete_user failed: {err}");
                    UiEvent::DeleteFailed {
                        id,
                        error: UiError::from_client(UiErrorContext::DeleteUser, &err),
                    }
                }
            }
        }
        BackendCommand::UpdateUser { id, patch } => {
            tracing::info!(user_id = id.0, "backend: update_user");
            match collection.update(id, &patch).await {
                Ok(user) => UiEvent::UserUpdated(user),
                Err(err) => {
                    tracing::error!(user_id = id.0, "backend: update_user failed: {err}");
                    UiEvent::UpdateFailed {
                        id,
                        error: UiError::from_client(UiErrorContext::UpdateUser, &err),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
