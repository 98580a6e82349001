use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sitemap_core::{ControllerConfig, PageSlots, TransportError, DEFAULT_SAMPLE_CAP};
use sitemap_engine::{ServiceSettings, DEFAULT_BASE_URL};
use sitemap_logging::{sitemap_info, sitemap_warn};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] TransportError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub sample_cap: usize,
    pub connect_timeout_secs: u64,
    /// Unset by default: a crawl may legitimately take longer than any guess.
    pub request_timeout_secs: Option<u64>,
    pub max_artifact_bytes: u64,
    pub download_dir: PathBuf,
    pub slots: PageSlots,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sample_cap: DEFAULT_SAMPLE_CAP,
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            max_artifact_bytes: 50 * 1024 * 1024,
            download_dir: PathBuf::from("downloads"),
            slots: PageSlots::default(),
        }
    }
}

impl AppConfig {
    pub fn service_settings(&self) -> Result<ServiceSettings, ConfigError> {
        let mut settings = ServiceSettings::parse(&self.base_url)?;
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        settings.request_timeout = self.request_timeout_secs.map(Duration::from_secs);
        settings.max_artifact_bytes = self.max_artifact_bytes;
        Ok(settings)
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            slots: self.slots.clone(),
            sample_cap: self.sample_cap,
        }
    }
}

/// Loads the configuration; a missing file falls back to defaults.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            sitemap_warn!("Config {:?} not found, using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    sitemap_info!("Loaded config from {:?}", path);
    Ok(config)
}
