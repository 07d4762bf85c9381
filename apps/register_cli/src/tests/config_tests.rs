use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_match_workflow_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.workflow.login_destination, "login.html");
    assert_eq!(settings.workflow.min_password_length, 6);
    assert!(!settings.workflow.send_otp_code);
    assert_eq!(settings.request_timeout_secs, None);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
server_url = "https://example.test"
request_timeout_secs = 15
login_destination = "/login"
send_otp_code = true
"#,
    )
    .expect("parse");

    assert_eq!(settings.server_url, "https://example.test");
    assert_eq!(settings.request_timeout_secs, Some(15));
    assert_eq!(settings.workflow.login_destination, "/login");
    assert!(settings.workflow.send_otp_code);
    assert_eq!(settings.workflow.min_password_length, 6);
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "bind_addr = \"0.0.0.0\"").is_err());
}

#[test]
fn env_overrides_file_and_skips_invalid_numbers() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "server_url = \"https://file.test\"").expect("parse");
    apply_env(
        &mut settings,
        env_from(&[
            ("APP__SERVER_URL", "https://env.test"),
            ("APP__MIN_PASSWORD_LENGTH", "eight"),
            ("APP__SEND_OTP_CODE", "true"),
        ]),
    );

    assert_eq!(settings.server_url, "https://env.test");
    assert_eq!(settings.workflow.min_password_length, 6);
    assert!(settings.workflow.send_otp_code);
}

#[test]
fn missing_settings_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("register_cli_missing_{suffix}.toml"));

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.workflow, WorkflowSettings::default());
}

#[test]
fn malformed_settings_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("register_cli_malformed_{suffix}.toml"));
    fs::write(&path, "server_url = ").expect("write");

    let err = load_settings(&path).expect_err("must fail");
    assert!(err.to_string().contains("failed to parse settings file"));

    fs::remove_file(path).expect("cleanup");
}
