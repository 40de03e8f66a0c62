use super::*;
use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use client_core::ClientError;
use crossbeam_channel::bounded;
use shared::domain::{DraftUser, User, UserId};

use crate::controller::{
    orchestration::dispatch_backend_command,
    reducer::{ControllerStatus, UserInterfaceController},
};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct InMemoryCollection {
    users: Mutex<Vec<User>>,
    next_id: Mutex<i64>,
    fail_list: bool,
}

impl InMemoryCollection {
    fn seeded(names: &[&str]) -> Self {
        let collection = Self::default();
        for name in names {
            collection.insert(DraftUser::new(*name, format!("{name}@x.io")));
        }
        collection
    }

    fn insert(&self, draft: DraftUser) -> User {
        let mut next_id = self.next_id.lock().expect("id lock");
        *next_id += 1;
        let user = User {
            id: UserId(*next_id),
            name: draft.name,
            email: draft.email,
        };
        self.users.lock().expect("users lock").push(user.clone());
        user
    }
}

#[async_trait]
impl UserCollection for InMemoryCollection {
    async fn list(&self) -> client_core::Result<Vec<User>> {
        if self.fail_list {
            return Err(ClientError::Server {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(self.users.lock().expect("users lock").clone())
    }

    async fn create(&self, draft: &DraftUser) -> client_core::Result<User> {
        Ok(self.insert(draft.clone()))
    }

    async fn delete(&self, id: UserId) -> client_core::Result<()> {
        let mut users = self.users.lock().expect("users lock");
        let before = users.len();
        users.retain(|user| user.id != id);
        if users.len() == before {
            return Err(ClientError::NotFound { id });
        }
        Ok(())
    }

    async fn update(&self, id: UserId, patch: &DraftUser) -> client_core::Result<User> {
        let mut users = self.users.lock().expect("users lock");
        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(ClientError::NotFound { id })?;
        user.name = patch.name.clone();
        user.email = patch.email.clone();
        Ok(user.clone())
    }
}

#[tokio::test]
async fn execute_maps_successes_to_completion_events() {
    let collection = InMemoryCollection::seeded(&["Ada"]);

    let event = execute(&collection, BackendCommand::ListUsers).await;
    assert!(matches!(event, UiEvent::UsersFetched(ref users) if users.len() == 1));

    let event = execute(
        &collection,
        BackendCommand::CreateUser {
            draft: DraftUser::new("Grace", "grace@x.io"),
        },
    )
    .await;
    assert!(matches!(event, UiEvent::UserCreated(ref user) if user.id == UserId(2)));

    let event = execute(&collection, BackendCommand::DeleteUser { id: UserId(1) }).await;
    assert!(matches!(event, UiEvent::UserDeleted(id) if id == UserId(1)));
}

#[tokio::test]
async fn execute_maps_failures_with_operation_context() {
    let collection = InMemoryCollection {
        fail_list: true,
        ..InMemoryCollection::default()
    };

    match execute(&collection, BackendCommand::ListUsers).await {
        UiEvent::FetchFailed(error) => {
            assert_eq!(error.category(), UiErrorCategory::Server);
            assert_eq!(error.context(), UiErrorContext::FetchUsers);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    match execute(
        &collection,
        BackendCommand::UpdateUser {
            id: UserId(8),
            patch: DraftUser::default(),
        },
    )
    .await
    {
        UiEvent::UpdateFailed { id, error } => {
            assert_eq!(id, UserId(8));
            assert_eq!(error.category(), UiErrorCategory::NotFound);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

fn drain_until_idle(
    controller: &mut UserInterfaceController,
    cmd_tx: &Sender<BackendCommand>,
    ui_rx: &Receiver<UiEvent>,
) {
    while controller.status() != ControllerStatus::Idle {
        let event = ui_rx.recv_timeout(RECV_TIMEOUT).expect("completion event");
        if let Some(follow_up) = controller.apply(event) {
            dispatch_backend_command(cmd_tx, follow_up, controller);
        }
    }
}

#[test]
fn worker_round_trips_controller_transitions() {
    let collection: Arc<dyn UserCollection> =
        Arc::new(InMemoryCollection::seeded(&["Ada", "Grace"]));
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(16);
    let worker = launch(collection, cmd_rx, ui_tx);

    let mut controller = UserInterfaceController::default();
    let cmd = controller.mount();
    dispatch_backend_command(&cmd_tx, cmd, &mut controller);
    drain_until_idle(&mut controller, &cmd_tx, &ui_rx);
    let ids: Vec<_> = controller.users().iter().map(|u| u.id.0).collect();
    assert_eq!(ids, vec![2, 1]);

    let cmd = controller.delete_clicked(UserId(1));
    dispatch_backend_command(&cmd_tx, cmd, &mut controller);
    drain_until_idle(&mut controller, &cmd_tx, &ui_rx);
    let ids: Vec<_> = controller.users().iter().map(|u| u.id.0).collect();
    assert_eq!(ids, vec![2]);

    controller.edit_draft(shared::domain::DraftField::Name, "Linus");
    controller.edit_draft(shared::domain::DraftField::Email, "linus@x.io");
    let cmd = controller.submit_create().expect("valid draft");
    dispatch_backend_command(&cmd_tx, cmd, &mut controller);
    drain_until_idle(&mut controller, &cmd_tx, &ui_rx);
    assert_eq!(controller.users().first().map(|u| u.name.as_str()), Some("Linus"));

    drop(cmd_tx);
    worker.join().expect("worker exits when the queue closes");
}

#[test]
fn completions_wait_for_room_in_a_full_event_queue() {
    let collection: Arc<dyn UserCollection> =
        Arc::new(InMemoryCollection::seeded(&["Ada", "Grace"]));
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(1);
    let worker = launch(collection, cmd_rx, ui_tx);

    let mut controller = UserInterfaceController::default();
    let cmd = controller.mount();
    dispatch_backend_command(&cmd_tx, cmd, &mut controller);
    let cmd = controller.delete_clicked(UserId(1));
    dispatch_backend_command(&cmd_tx, cmd, &mut controller);

    // Both commands finish well before the first event is taken off the queue.
    thread::sleep(Duration::from_millis(200));
    drain_until_idle(&mut controller, &cmd_tx, &ui_rx);

    assert_eq!(controller.status(), ControllerStatus::Idle);
    assert!(controller.users().iter().any(|user| user.id == UserId(2)));
    assert!(ui_rx.try_recv().is_err());

    drop(cmd_tx);
    worker.join().expect("worker exits when the queue closes");
}
