use std::{fs, path::Path};

use anyhow::{Context, Result};
use client_core::gateway::normalize_server_url;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "labeler.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub annotator: String,
    pub skip_labeled: bool,
    pub show_labeled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            annotator: String::new(),
            skip_labeled: false,
            show_labeled: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    annotator: Option<String>,
    skip_labeled: Option<bool>,
    show_labeled: Option<bool>,
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server_url: Option<String>,
    pub annotator: Option<String>,
    pub skip_labeled: Option<bool>,
    pub show_labeled: Option<bool>,
}

pub fn load_settings(config_path: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
    load_settings_with_env(config_path, overrides, |key| std::env::var(key).ok())
}

pub fn load_settings_with_env(
    config_path: Option<&Path>,
    overrides: &Overrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings> {
    let mut settings = Settings::default();

    if let Some(file_cfg) = read_file_settings(config_path)? {
        if let Some(v) = file_cfg.server_url {
            settings.server_url = v;
        }
        if let Some(v) = file_cfg.annotator {
            settings.annotator = v;
        }
        if let Some(v) = file_cfg.skip_labeled {
            settings.skip_labeled = v;
        }
        if let Some(v) = file_cfg.show_labeled {
            settings.show_labeled = v;
        }
    }

    for key in ["LABELER_SERVER_URL", "APP__SERVER_URL"] {
        if let Some(v) = env(key) {
            settings.server_url = v;
        }
    }
    for key in ["LABELER_ANNOTATOR", "APP__ANNOTATOR"] {
        if let Some(v) = env(key) {
            settings.annotator = v;
        }
    }
    if let Some(v) = env_flag(&env, "APP__SKIP_LABELED") {
        settings.skip_labeled = v;
    }
    if let Some(v) = env_flag(&env, "APP__SHOW_LABELED") {
        settings.show_labeled = v;
    }

    if let Some(v) = &overrides.server_url {
        settings.server_url = v.clone();
    }
    if let Some(v) = &overrides.annotator {
        settings.annotator = v.clone();
    }
    if let Some(v) = overrides.skip_labeled {
        settings.skip_labeled = v;
    }
    if let Some(v) = overrides.show_labeled {
        settings.show_labeled = v;
    }

    settings.server_url = normalize_server_url(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;

    Ok(settings)
}

/// An explicit path must exist; the default file is optional.
fn read_file_settings(config_path: Option<&Path>) -> Result<Option<FileSettings>> {
    let (path, required) = match config_path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };

    let parsed = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn env_flag(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    env(key).and_then(|raw| parse_flag(key, &raw))
}

fn parse_flag(key: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            warn!(key, value = other, "ignoring unrecognized boolean");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
