use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);

/// A user record as owned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Unsaved field values for a pending create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftUser {
    pub name: String,
    pub email: String,
}

impl DraftUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Email => &self.email,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        match field {
            DraftField::Name => self.name = value.into(),
            DraftField::Email => self.email = value.into(),
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Email,
}

impl DraftField {
    pub const ALL: [DraftField; 2] = [DraftField::Name, DraftField::Email];

    pub fn placeholder(self) -> &'static str {
        match self {
            DraftField::Name => "Name",
            DraftField::Email => "Email",
        }
    }
}

/// Free-text backend identifier: API path segment and styling key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendLabel(String);

impl BackendLabel {
    pub const DEFAULT: &'static str = "go";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Heading shown above the form, e.g. `Go Backend`.
    pub fn display_title(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => format!("{}{} Backend", first.to_uppercase(), chars.as_str()),
            None => "Backend".to_string(),
        }
    }

    pub fn logo_asset_name(&self) -> String {
        format!("{}logo.svg", self.0)
    }
}

impl Default for BackendLabel {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for BackendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BackendLabel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
