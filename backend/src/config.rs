//! Server configuration.
//!
//! Read from an optional YAML file, then overridden field by field from
//! `FINANCE_TRACKER_*` environment variables. Every field has a default, so
//! the server starts with no configuration at all.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shared::UiConfig;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "FINANCE_TRACKER_CONFIG";

pub const DEFAULT_CONFIG_PATH: &str = "finance-tracker.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Origin allowed by CORS
    #[serde(default = "default_frontend_origin")]
    pub frontend_origin: String,

    /// Built frontend served as the fallback route, if set
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Default tracing filter; `RUST_LOG` still wins
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub ui: UiConfig,
}

fn default_database_url() -> String {
    "sqlite:finance.db".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_frontend_origin() -> String {
    "http://localhost:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            bind_address: default_bind_address(),
            frontend_origin: default_frontend_origin(),
            static_dir: None,
            log_level: default_log_level(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load using the process environment
    pub fn load() -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(&env)
    }

    /// Load with an explicit environment map
    pub fn load_with_env(env: &HashMap<String, String>) -> Result<Self> {
        let path = env
            .get(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env(env)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    fn apply_env(&mut self, env: &HashMap<String, String>) -> Result<()> {
        if let Some(value) = env.get("FINANCE_TRACKER_DATABASE_URL") {
            self.database_url = value.clone();
        }
        if let Some(value) = env.get("FINANCE_TRACKER_BIND_ADDRESS") {
            self.bind_address = value.clone();
        }
        if let Some(value) = env.get("FINANCE_TRACKER_FRONTEND_ORIGIN") {
            self.frontend_origin = value.clone();
        }
        if let Some(value) = env.get("FINANCE_TRACKER_STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = env.get("FINANCE_TRACKER_MULTI_USER") {
            self.ui.multi_user = parse_flag("FINANCE_TRACKER_MULTI_USER", value)?;
        }
        if let Some(value) = env.get("FINANCE_TRACKER_CARRY_OVER") {
            self.ui.with_carry_over = parse_flag("FINANCE_TRACKER_CARRY_OVER", value)?;
        }
        Ok(())
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got '{}'", name, other),
    }
}
