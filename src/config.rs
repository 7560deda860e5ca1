//! Configuration handling for the employee form

use crate::service::DEFAULT_SERVICE_URL;
use crate::state::FormSettings;
use anyhow::{ensure, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration, every field optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the employee record service
    pub service_url: Option<String>,
    /// Domain employee emails must belong to
    pub email_domain: Option<String>,
    /// Minimum full name length
    pub name_min_length: Option<usize>,
    /// Maximum full name length
    pub name_max_length: Option<usize>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "employee-form", "employee-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config = Self::from_json(&content)
                    .with_context(|| format!("invalid config file {}", path.display()))?;
                tracing::debug!(path = %path.display(), "Loaded config");
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Parse and check a config document
    fn from_json(content: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject name bounds no value could satisfy
    pub fn validate(&self) -> Result<()> {
        let settings = self.form_settings();
        ensure!(
            settings.name_min_length > 0,
            "name_min_length must be at least 1"
        );
        ensure!(
            settings.name_min_length <= settings.name_max_length,
            "name_min_length ({}) is greater than name_max_length ({})",
            settings.name_min_length,
            settings.name_max_length
        );
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    pub fn service_url(&self) -> &str {
        self.service_url.as_deref().unwrap_or(DEFAULT_SERVICE_URL)
    }

    /// Schema settings with defaults filled in
    pub fn form_settings(&self) -> FormSettings {
        let defaults = FormSettings::default();
        FormSettings {
            email_domain: self
                .email_domain
                .clone()
                .unwrap_or(defaults.email_domain),
            name_min_length: self.name_min_length.unwrap_or(defaults.name_min_length),
            name_max_length: self.name_max_length.unwrap_or(defaults.name_max_length),
        }
    }
}
