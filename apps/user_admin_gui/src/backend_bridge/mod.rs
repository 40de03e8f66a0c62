//! Bridge between the UI thread and the backend worker running the user collection client.

pub mod commands;
pub mod runtime;
