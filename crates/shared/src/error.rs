use serde::{Deserialize, Serialize};

/// Error body a backend may return alongside a non-2xx status. Only the
/// message is relied upon; backends differ in whether they send a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}
