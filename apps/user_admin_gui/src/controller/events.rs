//! Backend completion events and error modeling for the user admin controller.

use client_core::ClientError;
use shared::domain::{User, UserId};

/// Exactly one event is reported per completed backend command.
#[derive(Debug)]
pub enum UiEvent {
    UsersFetched(Vec<User>),
    FetchFailed(UiError),
    UserCreated(User),
    CreateFailed(UiError),
    UserDeleted(UserId),
    DeleteFailed { id: UserId, error: UiError },
    UserUpdated(User),
    UpdateFailed { id: UserId, error: UiError },
    WorkerFailed(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    NotFound,
    Transport,
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FetchUsers,
    CreateUser,
    DeleteUser,
    UpdateUser,
}

impl UiErrorContext {
    /// Generic user-facing summary; the specific cause only goes to the detail.
    pub fn failure_summary(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "Backend worker failed to start",
            UiErrorContext::FetchUsers => "Error fetching users",
            UiErrorContext::CreateUser => "Error creating user",
            UiErrorContext::DeleteUser => "Error deleting user",
            UiErrorContext::UpdateUser => "Error updating user",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn from_client(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Validation { .. } => UiErrorCategory::Validation,
            ClientError::NotFound { .. } => UiErrorCategory::NotFound,
            ClientError::InvalidBaseUrl { .. }
            | ClientError::HttpSetup(_)
            | ClientError::Network(_) => UiErrorCategory::Transport,
            ClientError::Server { .. } | ClientError::Decode(_) => UiErrorCategory::Server,
        };
        Self::new(category, context, err.to_string())
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn summary(&self) -> &'static str {
        self.context.failure_summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_generic_summary() {
        let err = UiError::from_client(
            UiErrorContext::DeleteUser,
            &ClientError::NotFound { id: UserId(4) },
        );
        assert_eq!(err.category(), UiErrorCategory::NotFound);
        assert_eq!(err.summary(), "Error deleting user");
        assert_eq!(err.message(), "user 4 not found");
    }

    #[test]
    fn classifies_server_and_validation_failures() {
        let server = UiError::from_client(
            UiErrorContext::FetchUsers,
            &ClientError::Server {
                status: 503,
                message: "Service Unavailable".to_string(),
            },
        );
        assert_eq!(server.category(), UiErrorCategory::Server);

        let validation = UiError::from_client(
            UiErrorContext::CreateUser,
            &ClientError::Validation {
                message: "email already taken".to_string(),
            },
        );
        assert_eq!(validation.category(), UiErrorCategory::Validation);
        assert_eq!(validation.context(), UiErrorContext::CreateUser);
    }
}
