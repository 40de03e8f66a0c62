use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::{BackendLabel, DraftUser, User, UserId},
    error::ApiError,
    protocol::UserRoute,
};
use tracing::{debug, info, warn};
use url::Url;

pub mod error;

pub use error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Remote user collection. Each call is a single request; nothing is retried.
#[async_trait]
pub trait UserCollection: Send + Sync {
    async fn list(&self) -> Result<Vec<User>>;
    async fn create(&self, draft: &DraftUser) -> Result<User>;
    async fn delete(&self, id: UserId) -> Result<()>;
    async fn update(&self, id: UserId, patch: &DraftUser) -> Result<User>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub backend: BackendLabel,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str, backend: BackendLabel) -> Result<Self> {
        let parsed = Url::parse(base_url.trim()).map_err(|err| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            base_url: parsed,
            backend,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn url_for(&self, route: UserRoute) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(route.segments(&self.backend));
        Ok(url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Create,
    Delete(UserId),
    Update(UserId),
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Delete(_) => "delete",
            Operation::Update(_) => "update",
        }
    }

    fn target(self) -> Option<UserId> {
        match self {
            Operation::Delete(id) | Operation::Update(id) => Some(id),
            Operation::List | Operation::Create => None,
        }
    }

    fn carries_body(self) -> bool {
        matches!(self, Operation::Create | Operation::Update(_))
    }
}

pub struct UserCollectionClient {
    http: Client,
    config: ClientConfig,
}

impl UserCollectionClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::HttpSetup)?;
        Ok(Self::with_http(http, config))
    }

    pub fn with_http(http: Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    async fn ensure_success(&self, operation: Operation, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(status, response).await;
        warn!(
            backend = %self.config.backend,
            operation = operation.name(),
            status = status.as_u16(),
            "user collection request failed: {message}"
        );
        Err(match (status, operation.target()) {
            (StatusCode::NOT_FOUND, Some(id)) => ClientError::NotFound { id },
            (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _)
                if operation.carries_body() =>
            {
                ClientError::Validation { message }
            }
            _ => ClientError::Server {
                status: status.as_u16(),
                message,
            },
        })
    }
}

async fn error_message(status: StatusCode, response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    if let Ok(body) = serde_json::from_str::<ApiError>(&text) {
        return body.message;
    }
    let text = text.trim();
    if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        text.to_string()
    }
}

#[async_trait]
impl UserCollection for UserCollectionClient {
    async fn list(&self) -> Result<Vec<User>> {
        let url = self.config.url_for(UserRoute::Collection)?;
        debug!(%url, "listing users");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;
        let users: Vec<User> = self
            .ensure_success(Operation::List, response)
            .await?
            .json()
            .await
            .map_err(ClientError::from_transport)?;
        info!(backend = %self.config.backend, count = users.len(), "fetched users");
        Ok(users)
    }

    async fn create(&self, draft: &DraftUser) -> Result<User> {
        let url = self.config.url_for(UserRoute::Collection)?;
        let response = self
            .http
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(ClientError::from_transport)?;
        let user: User = self
            .ensure_success(Operation::Create, response)
            .await?
            .json()
            .await
            .map_err(ClientError::from_transport)?;
        info!(backend = %self.config.backend, user_id = user.id.0, "created user");
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        let url = self.config.url_for(UserRoute::Item(id))?;
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;
        self.ensure_success(Operation::Delete(id), response).await?;
        info!(backend = %self.config.backend, user_id = id.0, "deleted user");
        Ok(())
    }

    async fn update(&self, id: UserId, patch: &DraftUser) -> Result<User> {
        let url = self.config.url_for(UserRoute::Item(id))?;
        let response = self
            .http
            .put(url)
            .json(patch)
            .send()
            .await
            .map_err(ClientError::from_transport)?;
        let user: User = self
            .ensure_success(Operation::Update(id), response)
            .await?
            .json()
            .await
            .map_err(ClientError::from_transport)?;
        info!(backend = %self.config.backend, user_id = user.id.0, "updated user");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
