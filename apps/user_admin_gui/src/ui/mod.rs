//! UI layer for the user admin window: app shell and backend themes.

pub mod app;
pub mod theme;

pub use app::{StartupConfig, UserAdminApp};
