use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_API_ENDPOINT;
use crate::error::{Result, SyncError};

const TOKEN_VARS: [&str; 2] = ["GH_PROJECTS_TOKEN", "GITHUB_TOKEN"];
const ORGANIZATION_VAR: &str = "GH_ORGANIZATION_NAME";
const PROJECT_NUMBER_VAR: &str = "GH_PROJECT_NUMBER";

pub const DEFAULT_DAYS: u32 = 14;
pub const DEFAULT_EXCLUDE_AUTHORS: [&str; 2] = ["app/dependabot", "nextstrain-bot"];

#[derive(Deserialize, Serialize, Default, Debug)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_authors: Option<Vec<String>>,
}

/// An organization project addressed by login and number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub org: String,
    pub number: u32,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file");
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| SyncError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&config_path, &contents)
    }

    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| SyncError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |e: std::io::Error| SyncError::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        };
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, contents).map_err(write_err)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "project-sync")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(SyncError::NoConfigDir)
    }

    /// Get token with env vars taking precedence over config file
    pub fn token(&self) -> Result<String> {
        self.token_from(env_var)
    }

    fn token_from(&self, env: impl Fn(&str) -> Option<String>) -> Result<String> {
        TOKEN_VARS
            .iter()
            .find_map(|name| env(*name))
            .or_else(|| self.token.clone())
            .ok_or(SyncError::MissingToken)
    }

    /// Resolve the target project: explicit arguments, then env, then file.
    pub fn project(&self, org: Option<&str>, number: Option<u32>) -> Result<ProjectRef> {
        self.project_from(org, number, env_var)
    }

    fn project_from(
        &self,
        org: Option<&str>,
        number: Option<u32>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ProjectRef> {
        let org = org
            .map(String::from)
            .or_else(|| env(ORGANIZATION_VAR))
            .or_else(|| self.organization.clone())
            .ok_or(SyncError::MissingOrganization)?;

        let number = match number {
            Some(n) => n,
            None => match env(PROJECT_NUMBER_VAR) {
                Some(raw) => raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| SyncError::InvalidProjectNumber(raw))?,
                None => self.project_number.ok_or(SyncError::MissingProjectNumber)?,
            },
        };

        Ok(ProjectRef { org, number })
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }

    /// Lookback window in days, preferring explicit argument over config
    pub fn days(&self, explicit: Option<u32>) -> u32 {
        explicit.or(self.days).unwrap_or(DEFAULT_DAYS)
    }

    /// Authors to exclude from the search. Explicit arguments replace the
    /// configured list rather than extending it.
    pub fn exclude_authors(&self, explicit: &[String]) -> Vec<String> {
        if !explicit.is_empty() {
            return explicit.to_vec();
        }
        self.exclude_authors.clone().unwrap_or_else(|| {
            DEFAULT_EXCLUDE_AUTHORS
                .iter()
                .map(|s| s.to_string())
                .collect()
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
