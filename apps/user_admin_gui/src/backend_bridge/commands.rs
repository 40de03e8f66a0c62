//! Backend commands queued from UI to backend worker.

use shared::domain::{DraftUser, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    ListUsers,
    CreateUser { draft: DraftUser },
    DeleteUser { id: UserId },
    UpdateUser { id: UserId, patch: DraftUser },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::ListUsers => "list_users",
            BackendCommand::CreateUser { .. } => "create_user",
            BackendCommand::DeleteUser { .. } => "delete_user",
            BackendCommand::UpdateUser { .. } => "update_user",
        }
    }

    /// Writes hold the controller in `Submitting`; fetches in `Loading`.
    pub fn is_write(&self) -> bool {
        !matches!(self, BackendCommand::ListUsers)
    }
}
