use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Disk,
    Memory,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    /// Simulated network delay for login and registration.
    pub delay_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig { delay_ms: 1000 }
    }
}

impl AuthConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DashboardConfig {
    pub recent_expenses: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig { recent_expenses: 5 }
    }
}

fn default_currency() -> String {
    "¥".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    pub data_path: Option<String>,
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency: default_currency(),
            data_path: None,
            storage: StorageBackend::default(),
            auth: AuthConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("in", "kakeibo", "kakeibo").context("Could not determine project directories")
}

impl AppConfig {
    /// Loads the default config file, falling back to defaults when it has
    /// not been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.yaml"))
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(project_dirs()?.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
