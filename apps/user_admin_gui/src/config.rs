use std::{
    collections::HashMap,
    fs,
    path::{Component, Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use client_core::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use shared::domain::BackendLabel;

use crate::controller::{notifications::DEFAULT_NOTIFICATION_TTL, reducer::ListOrder};

pub const DEFAULT_SETTINGS_FILE: &str = "user_admin.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub backend: String,
    pub assets_dir: PathBuf,
    pub list_order: ListOrder,
    pub notification_ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.into(),
            backend: BackendLabel::DEFAULT.into(),
            assets_dir: PathBuf::from("assets"),
            list_order: ListOrder::default(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Settings {
    pub fn backend_label(&self) -> BackendLabel {
        BackendLabel::new(self.backend.trim())
    }

    /// Logo file inside `assets_dir`; `None` when the label would not stay a
    /// single file name there.
    pub fn logo_path(&self) -> Option<PathBuf> {
        let name = self.backend_label().logo_asset_name();
        let mut components = Path::new(&name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.assets_dir.join(name)),
            _ => None,
        }
    }

    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let config = ClientConfig::new(&self.api_url, self.backend_label())
            .with_context(|| format!("invalid api url '{}'", self.api_url))?;
        Ok(config.with_request_timeout(self.request_timeout))
    }
}

/// Defaults, then the settings file, then the process environment.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));

    match fs::read_to_string(path) {
        Ok(raw) => apply_file_settings(&mut settings, &raw),
        Err(err) => tracing::debug!(path = %path.display(), "no settings file loaded: {err}"),
    }
    apply_env_settings(&mut settings, |name| std::env::var(name).ok());

    settings
}

fn apply_file_settings(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, toml::Value>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            tracing::warn!("ignoring malformed settings file: {err}");
            return;
        }
    };

    let text = |key: &str| file_cfg.get(key).and_then(toml::Value::as_str).map(str::to_string);

    if let Some(v) = text("api_url") {
        settings.api_url = v;
    }
    if let Some(v) = text("backend") {
        settings.backend = v;
    }
    if let Some(v) = text("assets_dir") {
        settings.assets_dir = PathBuf::from(v);
    }
    if let Some(v) = text("list_order") {
        apply_list_order(settings, &v);
    }
    if let Some(ttl) = file_secs(&file_cfg, "notification_ttl_secs") {
        settings.notification_ttl = ttl;
    }
    if let Some(timeout) = file_secs(&file_cfg, "request_timeout_secs") {
        settings.request_timeout = timeout;
    }
}

fn file_secs(file_cfg: &HashMap<String, toml::Value>, key: &str) -> Option<Duration> {
    match file_cfg.get(key)? {
        toml::Value::Integer(secs) if *secs > 0 => Some(Duration::from_secs(*secs as u64)),
        other => {
            tracing::warn!("ignoring {key} = {other}; expected a positive integer");
            None
        }
    }
}

fn apply_env_settings(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("USER_ADMIN_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = lookup("USER_ADMIN_BACKEND") {
        settings.backend = v;
    }
    if let Some(v) = lookup("APP__BACKEND") {
        settings.backend = v;
    }

    if let Some(v) = lookup("APP__ASSETS_DIR") {
        settings.assets_dir = PathBuf::from(v);
    }

    if let Some(v) = lookup("APP__LIST_ORDER") {
        apply_list_order(settings, &v);
    }

    if let Some(ttl) = env_secs(&lookup, "APP__NOTIFICATION_TTL_SECS") {
        settings.notification_ttl = ttl;
    }
    if let Some(timeout) = env_secs(&lookup, "APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout = timeout;
    }
}

fn env_secs(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<Duration> {
    let raw = lookup(name)?;
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            tracing::warn!("ignoring {name}={raw}; expected a positive integer");
            None
        }
    }
}

fn apply_list_order(settings: &mut Settings, raw: &str) {
    match raw.parse::<ListOrder>() {
        Ok(order) => settings.list_order = order,
        Err(err) => tracing::warn!("ignoring list order setting: {err}"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
