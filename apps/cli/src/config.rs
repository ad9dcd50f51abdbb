use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "edustream.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub key_namespace: String,
    /// When set, sessions carry HS256-signed tokens instead of demo tokens.
    pub token_secret: Option<String>,
    pub token_ttl_seconds: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://./data/edustream.db".into(),
            key_namespace: storage::DEFAULT_NAMESPACE.into(),
            token_secret: None,
            token_ttl_seconds: 3600,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    database_url: Option<String>,
    key_namespace: Option<String>,
    token_secret: Option<String>,
    token_ttl_seconds: Option<i64>,
}

/// Defaults, then the config file, then environment variables.
///
/// An explicit `config_path` must exist; the implicit `edustream.toml` in
/// the working directory is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let file_cfg = match config_path {
        Some(path) => Some(read_file_settings(path)?),
        None if Path::new(CONFIG_FILE).exists() => Some(read_file_settings(Path::new(CONFIG_FILE))?),
        None => None,
    };

    if let Some(file_cfg) = file_cfg {
        if let Some(v) = file_cfg.database_url {
            settings.database_url = v;
        }
        if let Some(v) = file_cfg.key_namespace {
            settings.key_namespace = v;
        }
        if let Some(v) = file_cfg.token_secret {
            settings.token_secret = Some(v);
        }
        if let Some(v) = file_cfg.token_ttl_seconds {
            settings.token_ttl_seconds = v;
        }
    }

    if let Some(v) = env("EDUSTREAM_DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = env("APP__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = env("APP__KEY_NAMESPACE") {
        settings.key_namespace = v;
    }

    if let Some(v) = env("APP__TOKEN_SECRET") {
        settings.token_secret = (!v.is_empty()).then_some(v);
    }

    if let Some(v) = env("APP__TOKEN_TTL_SECONDS") {
        if let Ok(parsed) = v.parse::<i64>() {
            settings.token_ttl_seconds = parsed;
        }
    }

    settings.database_url = normalize_database_url(&settings.database_url);
    Ok(settings)
}

fn read_file_settings(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
