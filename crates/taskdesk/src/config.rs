//! Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

use crate::entities::StatusFilter;
use crate::errors::{TaskDeskError, TaskDeskResult};
use crate::export::DEFAULT_EXPORT_FILE_NAME;
use crate::storage::paths::default_config_dir;

/// Environment override for the config file path
pub const CONFIG_PATH_ENV: &str = "TASKDESK_CONFIG";

const CONFIG_FILE_NAME: &str = "config.json";

/// User settings, stored as `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding `tasks.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Filter applied when the list first opens
    #[serde(default)]
    pub default_filter: StatusFilter,

    /// File name suggested for exports
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_dir: None,
            default_filter: StatusFilter::default(),
            export_file_name: default_export_file_name(),
        }
    }
}

/// Loads and saves [`AppConfig`]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Config store for an explicit file
    pub fn new(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Config store at `TASKDESK_CONFIG`, or the platform config dir
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::new(PathBuf::from(path)),
            None => Self::new(default_config_dir().join(CONFIG_FILE_NAME)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration; a missing file yields the defaults
    pub async fn load(&self) -> TaskDeskResult<AppConfig> {
        match fs::read_to_string(&self.config_path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| TaskDeskError::ConfigError {
                reason: format!("{}: {e}", self.config_path.display()),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
            Err(e) => Err(TaskDeskError::FileReadError {
                path: self.config_path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Load configuration, writing the defaults on first run.
    ///
    /// A defaults file that cannot be written is logged and skipped.
    pub async fn load_or_init(&self) -> TaskDeskResult<AppConfig> {
        if fs::try_exists(&self.config_path).await.unwrap_or(false) {
            return self.load().await;
        }

        let config = AppConfig::default();
        match self.save(&config).await {
            Ok(()) => info!(path = %self.config_path.display(), "Wrote default config"),
            Err(e) => warn!(
                path = %self.config_path.display(),
                error = %e,
                "Could not write default config"
            ),
        }
        Ok(config)
    }

    /// Save configuration
    pub async fn save(&self, config: &AppConfig) -> TaskDeskResult<()> {
        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, content)
            .await
            .map_err(|e| TaskDeskError::FileWriteError {
                path: self.config_path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path().join("config.json"));

        let config = tokio_test::block_on(store.load()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.export_file_name, "Tasks.pdf");
        assert_eq!(config.default_filter, StatusFilter::All);
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "defaultFilter": "not-completed", "dataDir": "/srv/tasks" }"#)
            .await
            .unwrap();

        let config = ConfigStore::new(&path).load().await.unwrap();
        assert_eq!(config.default_filter, StatusFilter::NotCompleted);
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/tasks")));
        assert_eq!(config.log_level, "warn");
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ logLevel: ").await.unwrap();

        let err = ConfigStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, TaskDeskError::ConfigError { .. }));
    }

    #[tokio::test]
    async fn test_first_run_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path().join("taskdesk").join("config.json"));

        let config = store.load_or_init().await.unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(store.path().is_file());
        assert_eq!(store.load().await.unwrap(), AppConfig::default());
    }

    #[tokio::test]
    async fn test_existing_file_is_not_reset() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "logLevel": "debug" }"#).await.unwrap();

        let config = ConfigStore::new(&path).load_or_init().await.unwrap();

        assert_eq!(config.log_level, "debug");
        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, r#"{ "logLevel": "debug" }"#);
    }

    #[tokio::test]
    async fn test_unwritable_defaults_still_load() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").await.unwrap();
        let store = ConfigStore::new(blocker.join("config.json"));

        let config = store.load_or_init().await.unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path().join("nested").join("config.json"));
        let config = AppConfig {
            log_level: "debug".to_string(),
            export_file_name: "weekly.pdf".to_string(),
            ..AppConfig::default()
        };

        store.save(&config).await.unwrap();
        assert_eq!(store.load().await.unwrap(), config);
    }
}
