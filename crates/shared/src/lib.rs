//! Types shared by the user collection client, the desktop GUI and the CLI.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod validation;
