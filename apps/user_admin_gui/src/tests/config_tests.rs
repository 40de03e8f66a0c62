use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_target_local_go_backend() {
    let settings = Settings::default();
    assert_eq!(settings.api_url, "http://localhost:8080");
    assert_eq!(settings.backend, "go");
    assert_eq!(settings.logo_path(), Some(PathBuf::from("assets").join("gologo.svg")));
    assert_eq!(settings.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    assert_eq!(settings.list_order, ListOrder::IdDescending);
}

#[test]
fn file_settings_override_defaults() {
    let mut settings = Settings::default();
    apply_file_settings(
        &mut settings,
        r#"
api_url = "http://10.0.0.5:9000"
backend = "rust"
list_order = "reverse_server"
notification_ttl_secs = 9
request_timeout_secs = 3
"#,
    );
    assert_eq!(settings.api_url, "http://10.0.0.5:9000");
    assert_eq!(settings.backend, "rust");
    assert_eq!(settings.list_order, ListOrder::ReverseServer);
    assert_eq!(settings.notification_ttl, Duration::from_secs(9));
    assert_eq!(settings.request_timeout, Duration::from_secs(3));
}

#[test]
fn malformed_file_and_bad_values_are_ignored() {
    let mut settings = Settings::default();
    apply_file_settings(&mut settings, "api_url = [unterminated");
    assert_eq!(settings, Settings::default());

    apply_file_settings(
        &mut settings,
        "list_order = \"sideways\"\nnotification_ttl_secs = -3\nrequest_timeout_secs = \"5\"\n",
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env_settings(
        &mut settings,
        env_from(&[
            ("USER_ADMIN_API_URL", "http://plain:1"),
            ("APP__API_URL", "http://prefixed:2"),
            ("USER_ADMIN_BACKEND", "node"),
            ("APP__NOTIFICATION_TTL_SECS", "zero"),
            ("APP__REQUEST_TIMEOUT_SECS", "30"),
        ]),
    );
    assert_eq!(settings.api_url, "http://prefixed:2");
    assert_eq!(settings.backend, "node");
    assert_eq!(settings.notification_ttl, DEFAULT_NOTIFICATION_TTL);
    assert_eq!(settings.request_timeout, Duration::from_secs(30));
}

#[test]
fn request_timeout_reaches_client_config() {
    let settings = Settings {
        request_timeout: Duration::from_secs(2),
        ..Settings::default()
    };
    let config = settings.client_config().expect("valid settings");
    assert_eq!(config.request_timeout, Duration::from_secs(2));
    assert_eq!(config.backend.as_str(), "go");
}

#[test]
fn labels_that_escape_assets_dir_have_no_logo() {
    for backend in ["../secrets/", "nested/go", "/etc/"] {
        let settings = Settings {
            backend: backend.to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.logo_path(), None, "backend label {backend:?}");
    }

    let settings = Settings {
        backend: "rust".to_string(),
        ..Settings::default()
    };
    assert_eq!(settings.logo_path(), Some(PathBuf::from("assets").join("rustlogo.svg")));
}

#[test]
fn client_config_rejects_invalid_api_url() {
    let settings = Settings {
        api_url: "localhost without scheme".to_string(),
        ..Settings::default()
    };
    let err = settings.client_config().expect_err("must fail");
    assert!(err.to_string().contains("invalid api url"));
}

#[test]
fn load_settings_reads_explicit_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("user_admin_gui_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("user_admin.toml");
    fs::write(&path, "assets_dir = \"/srv/user-admin/public\"\n").expect("write settings");

    let settings = load_settings(Some(path.as_path()));
    if env::var("APP__ASSETS_DIR").is_err() {
        assert_eq!(settings.assets_dir, PathBuf::from("/srv/user-admin/public"));
    }

    fs::remove_dir_all(temp_root).expect("cleanup");
}
