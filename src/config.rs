use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::snapshot::SnapshotFile;

const APP_NAME: &str = "pert-estimator";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_PORT: u16 = 17020;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Snapshot used when `--file` is not given
    pub snapshot_path: Option<PathBuf>,
    /// Port for `pert serve`
    pub port: u16,
    /// Client name given to projects created with `pert init`
    pub client_name: String,
    /// Project name given to projects created with `pert init`
    pub project_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            port: DEFAULT_PORT,
            client_name: String::new(),
            project_name: pert_core::DEFAULT_PROJECT_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the user's config directory, then apply
    /// `PERT_SNAPSHOT` / `PERT_PORT` overrides.
    /// Falls back to defaults if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let config = match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env()
    }

    fn try_load() -> Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var("PERT_SNAPSHOT").ok(),
            std::env::var("PERT_PORT").ok(),
        )
    }

    /// Apply raw override values; an unparsable port is ignored.
    pub fn with_overrides(mut self, snapshot: Option<String>, port: Option<String>) -> Self {
        if let Some(path) = snapshot.filter(|s| !s.is_empty()) {
            self.snapshot_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = port {
            match raw.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PERT_PORT value {:?}", raw),
            }
        }
        self
    }

    /// The snapshot to operate on: explicit path, then config, then the
    /// platform default.
    pub fn snapshot_file(&self, explicit: Option<PathBuf>) -> Result<SnapshotFile> {
        match explicit.or_else(|| self.snapshot_path.clone()) {
            Some(path) => Ok(SnapshotFile::new(path)),
            None => SnapshotFile::open_default(),
        }
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"port": 8080}"#).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.project_name, "New Project Estimation");
        assert!(config.snapshot_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_overrides(Some("/tmp/est.json".to_string()), Some("9000".to_string()));
        assert_eq!(config.snapshot_path, Some(PathBuf::from("/tmp/est.json")));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let config = AppConfig::default().with_overrides(None, Some("http".to_string()));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_explicit_snapshot_wins() {
        let config = AppConfig {
            snapshot_path: Some(PathBuf::from("configured.json")),
            ..AppConfig::default()
        };
        let file = config
            .snapshot_file(Some(PathBuf::from("explicit.json")))
            .unwrap();
        assert_eq!(file.path(), std::path::Path::new("explicit.json"));

        let file = config.snapshot_file(None).unwrap();
        assert_eq!(file.path(), std::path::Path::new("configured.json"));
    }
}
