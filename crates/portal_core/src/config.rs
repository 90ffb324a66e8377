use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const CONFIG_FILE_NAME: &str = "portal.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub auth_url: Option<String>,
    pub auth_anon_key: Option<String>,
    pub early_adopters_table: String,
    pub request_timeout_seconds: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth_url: None,
            auth_anon_key: None,
            early_adopters_table: "early_adopters".into(),
            request_timeout_seconds: 15,
            log_filter: "info".into(),
        }
    }
}

/// Validated connection details for the sign-up service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEndpoint {
    pub base_url: String,
    pub anon_key: String,
    pub table: String,
    pub timeout_seconds: u64,
}

impl Settings {
    /// `None` when either the URL or the key is missing.
    pub fn auth_endpoint(&self) -> anyhow::Result<Option<AuthEndpoint>> {
        let (Some(raw_url), Some(anon_key)) = (
            non_blank(self.auth_url.as_deref()),
            non_blank(self.auth_anon_key.as_deref()),
        ) else {
            return Ok(None);
        };

        let url = Url::parse(raw_url)
            .with_context(|| format!("invalid auth service url '{raw_url}'"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("auth service url must be http or https, got '{}'", url.scheme());
        }
        if self.early_adopters_table.trim().is_empty() {
            bail!("early adopters table name must not be empty");
        }

        Ok(Some(AuthEndpoint {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            table: self.early_adopters_table.trim().to_string(),
            timeout_seconds: self.request_timeout_seconds.max(1),
        }))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    auth_url: Option<String>,
    auth_anon_key: Option<String>,
    early_adopters_table: Option<String>,
    request_timeout_seconds: Option<u64>,
    log_filter: Option<String>,
}

/// `./portal.toml` if present, else `<config dir>/charter/portal.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("charter").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Defaults, then the config file, then environment variables.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = config_path.map(Path::to_path_buf).or_else(default_config_path);
    load_settings_with(path.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(path) = config_path {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let file_cfg: FileSettings = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        debug!(path = %path.display(), "loaded config file");

        if let Some(v) = file_cfg.auth_url {
            settings.auth_url = Some(v);
        }
        if let Some(v) = file_cfg.auth_anon_key {
            settings.auth_anon_key = Some(v);
        }
        if let Some(v) = file_cfg.early_adopters_table {
            settings.early_adopters_table = v;
        }
        if let Some(v) = file_cfg.request_timeout_seconds {
            settings.request_timeout_seconds = v;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
    }

    if let Some(v) = env("CHARTER_AUTH_URL") {
        settings.auth_url = Some(v);
    }
    if let Some(v) = env("APP__AUTH_URL") {
        settings.auth_url = Some(v);
    }

    if let Some(v) = env("CHARTER_AUTH_ANON_KEY") {
        settings.auth_anon_key = Some(v);
    }
    if let Some(v) = env("APP__AUTH_ANON_KEY") {
        settings.auth_anon_key = Some(v);
    }

    if let Some(v) = env("APP__EARLY_ADOPTERS_TABLE") {
        settings.early_adopters_table = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_seconds = parsed;
        }
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
