//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name used under the platform config/data directories
pub const APP_DIR_NAME: &str = "listen-review";

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "REVIEW_ROOT_FOLDER";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5730;

/// Column sync: Sunday 00:00 (sec min hour day-of-month month day-of-week)
pub const DEFAULT_SYNC_SCHEDULE: &str = "0 0 0 * * Sun";

/// Review export: Sunday 18:00
pub const DEFAULT_EXPORT_SCHEDULE: &str = "0 0 18 * * Sun";

/// Contents of the optional TOML config file
///
/// Every key is optional; anything left out falls back to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub sync_schedule: Option<String>,
    pub export_schedule: Option<String>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the config file, degrading to an empty config on any failure
    ///
    /// An explicit path that cannot be read is still not fatal: the service
    /// starts on defaults and says so in the log.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match find_config_file() {
                Ok(p) => p,
                Err(_) => {
                    info!("No config file found, using defaults");
                    return Self::default();
                }
            },
        };

        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded config file: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Fully resolved service settings
///
/// Schedules are fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub host: String,
    pub port: u16,
    pub sync_schedule: String,
    pub export_schedule: String,
}

impl ServiceConfig {
    /// Merge command-line values (already merged with env by clap) over the TOML file
    pub fn resolve(
        cli_root: Option<&Path>,
        cli_host: Option<&str>,
        cli_port: Option<u16>,
        toml: &TomlConfig,
    ) -> Self {
        Self {
            root_folder: resolve_root_folder(cli_root, ROOT_FOLDER_ENV, toml),
            host: cli_host
                .map(str::to_string)
                .or_else(|| toml.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli_port.or(toml.port).unwrap_or(DEFAULT_PORT),
            sync_schedule: toml
                .sync_schedule
                .clone()
                .unwrap_or_else(|| DEFAULT_SYNC_SCHEDULE.to_string()),
            export_schedule: toml
                .export_schedule
                .clone()
                .unwrap_or_else(|| DEFAULT_EXPORT_SCHEDULE.to_string()),
        }
    }

    pub fn data_paths(&self) -> DataPaths {
        DataPaths::new(&self.root_folder)
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml: &TomlConfig,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// Locate the config file for the platform
fn find_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc").join(APP_DIR_NAME).join("config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("./review_data"))
}

/// Fixed file locations under `<root>/data`
#[derive(Debug, Clone)]
pub struct DataPaths {
    data_dir: PathBuf,
}

impl DataPaths {
    pub fn new(root_folder: &Path) -> Self {
        Self {
            data_dir: root_folder.join("data"),
        }
    }

    /// Create the data directory if it does not exist
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
            info!("Created data directory: {}", self.data_dir.display());
        }
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("reviews.db")
    }

    /// Column snapshot read by the sync job
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("column_info.json")
    }

    /// Spreadsheet written by the scheduled export
    pub fn weekly_export_path(&self) -> PathBuf {
        self.data_dir.join("reviews_weekly.xlsx")
    }

    /// Spreadsheet written by the download endpoint
    pub fn on_demand_export_path(&self) -> PathBuf {
        self.data_dir.join("reviews_export.xlsx")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths_layout() {
        let paths = DataPaths::new(Path::new("/srv/review"));
        assert_eq!(paths.data_dir(), Path::new("/srv/review/data"));
        assert_eq!(paths.database_path(), PathBuf::from("/srv/review/data/reviews.db"));
        assert_eq!(
            paths.snapshot_path(),
            PathBuf::from("/srv/review/data/column_info.json")
        );
        assert_ne!(paths.weekly_export_path(), paths.on_demand_export_path());
    }

    #[test]
    fn test_toml_partial_keys() {
        let config: TomlConfig = toml::from_str("port = 8080\n").unwrap();
        assert_eq!(config.port, Some(8080));
        assert!(config.host.is_none());
        assert!(config.sync_schedule.is_none());
    }

    #[test]
    fn test_cli_values_win_over_toml() {
        let toml = TomlConfig {
            root_folder: Some(PathBuf::from("/from/toml")),
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            sync_schedule: Some("0 0 1 * * Mon".to_string()),
            export_schedule: None,
        };

        let config = ServiceConfig::resolve(
            Some(Path::new("/from/cli")),
            None,
            Some(7000),
            &toml,
        );

        assert_eq!(config.root_folder, PathBuf::from("/from/cli"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7000);
        assert_eq!(config.sync_schedule, "0 0 1 * * Mon");
        assert_eq!(config.export_schedule, DEFAULT_EXPORT_SCHEDULE);
    }
}
