use std::{env, fmt, path::PathBuf, str::FromStr};

pub const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATA_PATH: &str = "data/weeks.json";
const DEFAULT_LOCAL_PATH: &str = "data/local_storage.json";
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Which persistence variant the UI and the session talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    #[default]
    Remote,
    Local,
}

impl StorageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageMode::Remote => "remote",
            StorageMode::Local => "local",
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "remote" | "api" => Ok(StorageMode::Remote),
            "local" | "local-storage" => Ok(StorageMode::Local),
            other => Err(ConfigError::UnknownStorage(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("APP_STORAGE must be 'remote' or 'local', got '{0}'")]
    UnknownStorage(String),
}

/// Settings read from the environment.
///
/// The server binary uses `port`, `data_path` and `storage`. `local_path`
/// and `api_url` configure library clients only: [`Storage::from_config`]
/// reads them to build the adapter a [`Session`] talks to, and the server
/// ignores them.
///
/// [`Storage::from_config`]: crate::storage::Storage::from_config
/// [`Session`]: crate::session::Session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    /// Adapter the page starts with; also picks the session adapter.
    pub storage: StorageMode,
    /// Snapshot file for [`StorageMode::Local`] sessions.
    pub local_path: PathBuf,
    /// Backend base URL for [`StorageMode::Remote`] sessions.
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            storage: StorageMode::default(),
            local_path: PathBuf::from(DEFAULT_LOCAL_PATH),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(port) = lookup("PORT").and_then(|value| value.parse::<u16>().ok()) {
            config.port = port;
        }
        if let Some(path) = lookup("APP_DATA_PATH") {
            config.data_path = PathBuf::from(path);
        }
        if let Some(mode) = lookup("APP_STORAGE") {
            config.storage = mode.parse()?;
        }
        if let Some(path) = lookup("APP_LOCAL_PATH") {
            config.local_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("APP_API_URL") {
            config.api_url = url;
        }

        Ok(config)
    }
}
