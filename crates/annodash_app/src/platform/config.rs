use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use annodash_core::{DashboardSettings, DEFAULT_PAGE_LENGTH};
use annodash_engine::{ApiError, ClientSettings};
use annodash_logging::parse_level;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use super::cli::Args;
use super::logging::LogDestination;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] ApiError),
    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

/// Contents of the optional RON configuration file.
///
/// Every field is optional in the file; omitted ones keep their default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub delete_enabled: bool,
    pub page_length: usize,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            base_url: client.base_url.to_string(),
            delete_enabled: false,
            page_length: DEFAULT_PAGE_LENGTH,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_response_bytes: client.max_bytes,
            log_destination: LogDestination::File,
            log_file: PathBuf::from("./annodash.log"),
            log_level: None,
        }
    }
}

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// No path was given.
    Defaults,
    /// A path was given but no file exists there.
    Missing(PathBuf),
    File(PathBuf),
}

/// Everything the platform needs to start, after merging file and flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientSettings,
    pub dashboard: DashboardSettings,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Loads `path` if given. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigOrigin), ConfigError> {
        let Some(path) = path else {
            return Ok((Self::default(), ConfigOrigin::Defaults));
        };
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok((Self::default(), ConfigOrigin::Missing(path.to_path_buf())));
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
        Ok((config, ConfigOrigin::File(path.to_path_buf())))
    }

    pub fn apply_args(mut self, args: &Args) -> Self {
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if args.enable_delete {
            self.delete_enabled = true;
        }
        if let Some(page_length) = args.page_length {
            self.page_length = page_length;
        }
        if let Some(secs) = args.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(destination) = args.log {
            self.log_destination = destination;
        }
        if let Some(log_file) = &args.log_file {
            self.log_file = log_file.clone();
        }
        if let Some(level) = &args.log_level {
            self.log_level = Some(level.clone());
        }
        self
    }

    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let client = ClientSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
            ..ClientSettings::for_base_url(&self.base_url)?
        };
        let log_level = match &self.log_level {
            Some(name) => parse_level(name).ok_or_else(|| ConfigError::LogLevel(name.clone()))?,
            None => annodash_logging::default_level(),
        };
        Ok(Settings {
            client,
            dashboard: DashboardSettings {
                delete_enabled: self.delete_enabled,
                page_length: self.page_length.max(1),
            },
            log_destination: self.log_destination,
            log_file: self.log_file.clone(),
            log_level,
        })
    }
}
