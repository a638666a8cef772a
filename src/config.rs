use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{ReportError, Result};

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    #[serde(default)]
    pub jira: JiraConfig,
    /// Log raw filter responses and every outbound request.
    #[serde(default)]
    pub debug: bool,
}

/// Connection details for the Jira instance.
#[derive(Deserialize, Default, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct JiraConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "token")]
    pub api_token: String,
}

impl Config {
    /// Load from `explicit` when given, otherwise from the default location,
    /// then apply `JIRA_*` environment overrides and validate.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::config_path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ReportError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ReportError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "wkreport")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(ReportError::NoConfigDir)
    }

    /// Environment takes precedence over the config file. `JIRA_TOKEN` wins
    /// over `JIRA_API_TOKEN` when both are set.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = non_empty("JIRA_URL") {
            self.jira.url = v;
        }
        if let Some(v) = non_empty("JIRA_EMAIL") {
            self.jira.email = v;
        }
        if let Some(v) = non_empty("JIRA_API_TOKEN") {
            self.jira.api_token = v;
        }
        if let Some(v) = non_empty("JIRA_TOKEN") {
            self.jira.api_token = v;
        }
        if non_empty("JIRA_DEBUG").is_some() {
            self.debug = true;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.jira.url.trim().is_empty() {
            return Err(ReportError::MissingSetting {
                name: "url",
                hint: "[jira] url in config.toml or JIRA_URL",
            });
        }
        if self.jira.email.trim().is_empty() {
            return Err(ReportError::MissingSetting {
                name: "email",
                hint: "[jira] email in config.toml or JIRA_EMAIL",
            });
        }
        if self.jira.api_token.trim().is_empty() {
            return Err(ReportError::MissingSetting {
                name: "api token",
                hint: "[jira] api_token in config.toml or JIRA_API_TOKEN",
            });
        }
        Ok(())
    }
}
