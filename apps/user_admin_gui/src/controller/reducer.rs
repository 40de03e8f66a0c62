//! State transitions of the user list, the create/update drafts and validation errors.
//!
//! The controller never talks to the network itself: transitions return the
//! [`BackendCommand`] to queue, and completions come back through [`apply`].
//! After a delete or update the list is re-fetched instead of patched locally.
//!
//! [`apply`]: UserInterfaceController::apply

use std::{str::FromStr, time::{Duration, Instant}};

use shared::{
    domain::{DraftField, DraftUser, User, UserId},
    validation::{validate_draft, ValidationErrors},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    notifications::{NotificationSeverity, Notifications, DEFAULT_NOTIFICATION_TTL},
};

const VALIDATION_WARNING: &str = "Please fill in all required fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerStatus {
    Idle,
    Loading,
    Submitting,
}

/// How a full fetch is arranged into newest-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Highest server-assigned id first.
    #[default]
    IdDescending,
    /// Reverse of the order the server returned, assuming ascending creation.
    ReverseServer,
}

impl ListOrder {
    pub fn arrange(self, mut users: Vec<User>) -> Vec<User> {
        match self {
            ListOrder::IdDescending => users.sort_by(|a, b| b.id.cmp(&a.id)),
            ListOrder::ReverseServer => users.reverse(),
        }
        users
    }
}

impl FromStr for ListOrder {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "id_descending" => Ok(ListOrder::IdDescending),
            "reverse_server" => Ok(ListOrder::ReverseServer),
            other => Err(format!("unknown list order '{other}'")),
        }
    }
}

#[derive(Debug)]
pub struct UserInterfaceController {
    users: Vec<User>,
    draft: DraftUser,
    update_draft: DraftUser,
    errors: ValidationErrors,
    list_order: ListOrder,
    fetches_in_flight: usize,
    writes_in_flight: usize,
    notifications: Notifications,
}

impl Default for UserInterfaceController {
    fn default() -> Self {
        Self::new(ListOrder::default(), DEFAULT_NOTIFICATION_TTL)
    }
}

impl UserInterfaceController {
    pub fn new(list_order: ListOrder, notification_ttl: Duration) -> Self {
        Self {
            users: Vec::new(),
            draft: DraftUser::default(),
            update_draft: DraftUser::default(),
            errors: ValidationErrors::default(),
            list_order,
            fetches_in_flight: 0,
            writes_in_flight: 0,
            notifications: Notifications::new(notification_ttl),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn draft(&self) -> &DraftUser {
        &self.draft
    }

    pub fn update_draft(&self) -> &DraftUser {
        &self.update_draft
    }

    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn status(&self) -> ControllerStatus {
        if self.writes_in_flight > 0 {
            ControllerStatus::Submitting
        } else if self.fetches_in_flight > 0 {
            ControllerStatus::Loading
        } else {
            ControllerStatus::Idle
        }
    }

    pub fn mount(&mut self) -> BackendCommand {
        self.begin(BackendCommand::ListUsers)
    }

    pub fn edit_draft(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set_field(field, value);
        self.errors.clear(field);
    }

    /// Fills the patch sent by every update click.
    pub fn edit_update_draft(&mut self, field: DraftField, value: impl Into<String>) {
        self.update_draft.set_field(field, value);
    }

    /// Returns `None` when validation blocked the request.
    pub fn submit_create(&mut self) -> Option<BackendCommand> {
        if let Err(errors) = validate_draft(&self.draft) {
            tracing::warn!(fields = ?errors.fields(), "create blocked by validation");
            self.errors = errors;
            self.notifications
                .push(NotificationSeverity::Warning, VALIDATION_WARNING, None);
            return None;
        }

        Some(self.begin(BackendCommand::CreateUser {
            draft: self.draft.clone(),
        }))
    }

    pub fn delete_clicked(&mut self, id: UserId) -> BackendCommand {
        self.begin(BackendCommand::DeleteUser { id })
    }

    /// The patch is the update draft, not the clicked row's values.
    pub fn update_clicked(&mut self, id: UserId) -> BackendCommand {
        self.begin(BackendCommand::UpdateUser {
            id,
            patch: self.update_draft.clone(),
        })
    }

    /// Applies a completion; returns the reconciling fetch after delete/update.
    pub fn apply(&mut self, event: UiEvent) -> Option<BackendCommand> {
        match event {
            UiEvent::UsersFetched(users) => {
                self.finish_fetch();
                self.users = self.list_order.arrange(users);
                None
            }
            UiEvent::FetchFailed(error) => {
                self.finish_fetch();
                self.notify_failure(&error);
                None
            }
            UiEvent::UserCreated(user) => {
                self.finish_write();
                self.users.insert(0, user);
                self.draft.clear();
                self.errors = ValidationErrors::default();
                self.notifications
                    .push(NotificationSeverity::Success, "User created", None);
                None
            }
            UiEvent::CreateFailed(error) => {
                self.finish_write();
                self.notify_failure(&error);
                None
            }
            UiEvent::UserDeleted(id) => {
                self.finish_write();
                tracing::debug!(user_id = id.0, "delete confirmed; reconciling list");
                self.notifications
                    .push(NotificationSeverity::Success, "User deleted", None);
                Some(self.begin(BackendCommand::ListUsers))
            }
            UiEvent::DeleteFailed { id, error } => {
                self.finish_write();
                tracing::debug!(user_id = id.0, "delete failed; keeping list");
                self.notify_failure(&error);
                None
            }
            UiEvent::UserUpdated(user) => {
                self.finish_write();
                tracing::debug!(user_id = user.id.0, "update confirmed; reconciling list");
                self.notifications
                    .push(NotificationSeverity::Success, "User updated", None);
                Some(self.begin(BackendCommand::ListUsers))
            }
            UiEvent::UpdateFailed { id, error } => {
                self.finish_write();
                tracing::debug!(user_id = id.0, "update failed; keeping list");
                self.notify_failure(&error);
                None
            }
            UiEvent::WorkerFailed(error) => {
                self.fetches_in_flight = 0;
                self.writes_in_flight = 0;
                self.notify_failure(&error);
                None
            }
        }
    }

    /// Releases a command that never reached the worker.
    pub fn command_rejected(&mut self, cmd: &BackendCommand, reason: &str) {
        if cmd.is_write() {
            self.finish_write();
        } else {
            self.finish_fetch();
        }
        let context = match cmd {
            BackendCommand::ListUsers => UiErrorContext::FetchUsers,
            BackendCommand::CreateUser { .. } => UiErrorContext::CreateUser,
            BackendCommand::DeleteUser { .. } => UiErrorContext::DeleteUser,
            BackendCommand::UpdateUser { .. } => UiErrorContext::UpdateUser,
        };
        self.notifications.push(
            NotificationSeverity::Error,
            context.failure_summary(),
            Some(reason.to_string()),
        );
    }

    pub fn expire_notifications(&mut self, now: Instant) {
        self.notifications.expire(now);
    }

    fn begin(&mut self, cmd: BackendCommand) -> BackendCommand {
        if cmd.is_write() {
            self.writes_in_flight += 1;
        } else {
            self.fetches_in_flight += 1;
        }
        cmd
    }

    fn finish_fetch(&mut self) {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
    }

    fn finish_write(&mut self) {
        self.writes_in_flight = self.writes_in_flight.saturating_sub(1);
    }

    fn notify_failure(&mut self, error: &UiError) {
        tracing::error!(
            category = ?error.category(),
            context = ?error.context(),
            "{}: {}",
            error.summary(),
            error.message()
        );
        self.notifications.push(
            NotificationSeverity::Error,
            error.summary(),
            Some(error.message().to_string()),
        );
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
