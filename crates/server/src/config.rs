use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use server_api::DEFAULT_MAX_UPLOAD_BYTES;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub server_bind: String,
    pub catalog_path: Option<String>,
    pub slide_interval_ms: u64,
    pub max_upload_bytes: usize,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            catalog_path: None,
            slide_interval_ms: 2000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn slide_interval(&self) -> Duration {
        Duration::from_millis(self.slide_interval_ms.max(1))
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(Path::new)
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };
    let text = |key: &str| -> Option<String> {
        match file_cfg.get(key)? {
            toml::Value::String(v) => Some(v.clone()),
            toml::Value::Integer(v) => Some(v.to_string()),
            _ => None,
        }
    };

    if let Some(v) = text("bind_addr") {
        settings.server_bind = v;
    }
    if let Some(v) = text("catalog_path") {
        settings.catalog_path = Some(v);
    }
    if let Some(v) = text("slide_interval_ms").and_then(|v| v.parse().ok()) {
        settings.slide_interval_ms = v;
    }
    if let Some(v) = text("max_upload_bytes").and_then(|v| v.parse().ok()) {
        settings.max_upload_bytes = v;
    }
    if let Some(v) = text("log_filter") {
        settings.log_filter = v;
    }
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("APP__CATALOG_PATH") {
        settings.catalog_path = Some(v);
    }

    if let Some(v) = var("APP__SLIDE_INTERVAL_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.slide_interval_ms = parsed;
        }
    }

    if let Some(v) = var("APP__MAX_UPLOAD_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_upload_bytes = parsed;
        }
    }

    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
