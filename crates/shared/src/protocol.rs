//! Route layout of the user collection API: `/api/{backend}/users[/{id}]`.

use crate::domain::{BackendLabel, UserId};

pub const API_PREFIX: &str = "api";
pub const USERS_COLLECTION: &str = "users";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRoute {
    Collection,
    Item(UserId),
}

impl UserRoute {
    /// Unencoded path segments below the base URL.
    pub fn segments(self, backend: &BackendLabel) -> Vec<String> {
        let mut segments = vec![
            API_PREFIX.to_string(),
            backend.as_str().to_string(),
            USERS_COLLECTION.to_string(),
        ];
        if let UserRoute::Item(id) = self {
            segments.push(id.to_string());
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_collection_and_item_segments() {
        let backend = BackendLabel::new("go");
        assert_eq!(UserRoute::Collection.segments(&backend), ["api", "go", "users"]);
        assert_eq!(
            UserRoute::Item(UserId(42)).segments(&backend),
            ["api", "go", "users", "42"]
        );
    }
}
