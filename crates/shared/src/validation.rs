//! Client-side draft validation: required fields must be non-blank.

use crate::domain::{DraftField, DraftUser};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        match field {
            DraftField::Name => self.name.as_deref(),
            DraftField::Email => self.email.as_deref(),
        }
    }

    pub fn clear(&mut self, field: DraftField) {
        match field {
            DraftField::Name => self.name = None,
            DraftField::Email => self.email = None,
        }
    }

    /// Fields in error, name first.
    pub fn fields(&self) -> Vec<DraftField> {
        DraftField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .collect()
    }
}

fn required_message(field: DraftField) -> &'static str {
    match field {
        DraftField::Name => NAME_REQUIRED,
        DraftField::Email => EMAIL_REQUIRED,
    }
}

/// Only blankness is checked; email format is left to the server.
pub fn validate_draft(draft: &DraftUser) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for field in DraftField::ALL {
        if draft.field(field).trim().is_empty() {
            let message = Some(required_message(field).to_string());
            match field {
                DraftField::Name => errors.name = message,
                DraftField::Email => errors.email = message,
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
