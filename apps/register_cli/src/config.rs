use std::{fs, io::ErrorKind, path::Path};

use anyhow::Context;
use client_core::WorkflowSettings;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_secs: Option<u64>,
    pub workflow: WorkflowSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3000".into(),
            request_timeout_secs: None,
            workflow: WorkflowSettings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
    login_destination: Option<String>,
    min_password_length: Option<usize>,
    send_otp_code: Option<bool>,
    progress_label: Option<String>,
}

/// Defaults, then the optional settings file, then `APP__*` environment variables.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    if let Some(v) = file_cfg.login_destination {
        settings.workflow.login_destination = v;
    }
    if let Some(v) = file_cfg.min_password_length {
        settings.workflow.min_password_length = v;
    }
    if let Some(v) = file_cfg.send_otp_code {
        settings.workflow.send_otp_code = v;
    }
    if let Some(v) = file_cfg.progress_label {
        settings.workflow.progress_label = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(_) => warn!(value = %v, "ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }
    if let Some(v) = lookup("APP__LOGIN_DESTINATION") {
        settings.workflow.login_destination = v;
    }
    if let Some(v) = lookup("APP__MIN_PASSWORD_LENGTH") {
        match v.parse::<usize>() {
            Ok(parsed) => settings.workflow.min_password_length = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__MIN_PASSWORD_LENGTH"),
        }
    }
    if let Some(v) = lookup("APP__SEND_OTP_CODE") {
        match v.parse::<bool>() {
            Ok(parsed) => settings.workflow.send_otp_code = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__SEND_OTP_CODE"),
        }
    }
    if let Some(v) = lookup("APP__PROGRESS_LABEL") {
        settings.workflow.progress_label = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
