//! Where the task store lives on disk.
//!
//! | Purpose | Linux | macOS | Windows |
//! |---------|-------|-------|---------|
//! | Store | `~/.local/share/taskdesk/tasks.json` | `~/Library/Application Support/taskdesk/tasks.json` | `%APPDATA%\taskdesk\tasks.json` |
//!
//! `TASKDESK_DATA_DIR` overrides the directory. Earlier releases kept
//! `tasks.json` in the working directory; that copy is the legacy file.

use std::path::{Path, PathBuf};

/// File name of the store, in both the data dir and the legacy location
pub const STORE_FILE_NAME: &str = "tasks.json";

/// Environment override for the data directory
pub const DATA_DIR_ENV: &str = "TASKDESK_DATA_DIR";

const APP_DIR_NAME: &str = "taskdesk";

/// Resolved location of the task store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    /// The store file read and written by the repository
    pub data_file: PathBuf,

    /// Pre-migration store copied forward when `data_file` is absent
    pub legacy_file: Option<PathBuf>,
}

impl StoreLocation {
    /// Explicit store path with no legacy file
    pub fn at(data_file: impl AsRef<Path>) -> Self {
        Self {
            data_file: data_file.as_ref().to_path_buf(),
            legacy_file: None,
        }
    }

    /// Set the legacy file to migrate from
    pub fn with_legacy_file(mut self, legacy_file: impl AsRef<Path>) -> Self {
        self.legacy_file = Some(legacy_file.as_ref().to_path_buf());
        self
    }

    /// Per-user location, with the working-directory file as legacy source.
    ///
    /// Precedence: `data_dir_override`, then `TASKDESK_DATA_DIR`, then the
    /// platform data directory.
    pub fn resolve(data_dir_override: Option<&Path>) -> Self {
        let data_dir = data_dir_override.map_or_else(default_data_dir, Path::to_path_buf);
        let legacy_file = std::env::current_dir()
            .ok()
            .map(|cwd| cwd.join(STORE_FILE_NAME));

        Self {
            data_file: data_dir.join(STORE_FILE_NAME),
            legacy_file,
        }
    }

    /// Directory holding the store file
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_file.parent()
    }
}

/// Platform data directory for the app, honoring `TASKDESK_DATA_DIR`
pub fn default_data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".taskdesk"))
}

/// Platform config directory for the app
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".taskdesk"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_at_has_no_legacy_file() {
        let location = StoreLocation::at("/tmp/x/tasks.json");
        assert_eq!(location.data_file, PathBuf::from("/tmp/x/tasks.json"));
        assert!(location.legacy_file.is_none());
        assert_eq!(location.data_dir(), Some(Path::new("/tmp/x")));
    }

    #[test]
    #[serial]
    fn test_override_wins_over_env() {
        std::env::set_var(DATA_DIR_ENV, "/from/env");
        let location = StoreLocation::resolve(Some(Path::new("/from/flag")));
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(location.data_file, PathBuf::from("/from/flag/tasks.json"));
    }

    #[test]
    #[serial]
    fn test_env_override() {
        std::env::set_var(DATA_DIR_ENV, "/from/env");
        let location = StoreLocation::resolve(None);
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(location.data_file, PathBuf::from("/from/env/tasks.json"));
        let legacy = location.legacy_file.unwrap();
        assert!(legacy.ends_with(STORE_FILE_NAME));
    }
}
