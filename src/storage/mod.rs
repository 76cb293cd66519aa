//! Persistence adapters for week records.
//!
//! Both variants satisfy [`WeekStorage`]. Which one a session uses is
//! decided once at startup through [`Storage::from_config`].

mod local;
mod remote;

pub use local::LocalSnapshotStorage;
pub use remote::RemoteStorage;

use crate::config::{Config, StorageMode};
use crate::models::WeekRecord;
use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("invalid api url: {0}")]
    InvalidUrl(String),
    #[error("stored snapshot is corrupt: {0}")]
    Corrupt(String),
}

pub trait WeekStorage {
    /// `Ok(None)` when nothing is stored for the week.
    fn load(
        &self,
        week_key: &str,
    ) -> impl Future<Output = Result<Option<WeekRecord>, StorageError>> + Send;

    /// Returns the confirmation message to show the user.
    fn save(
        &self,
        week_key: &str,
        record: &WeekRecord,
    ) -> impl Future<Output = Result<String, StorageError>> + Send;

    /// Week keys with stored records. Variants without a week index return
    /// an empty list.
    fn list_weeks(&self) -> impl Future<Output = Result<Vec<String>, StorageError>> + Send;
}

#[derive(Debug, Clone)]
pub enum Storage {
    Local(LocalSnapshotStorage),
    Remote(RemoteStorage),
}

impl Storage {
    pub fn from_config(config: &Config) -> Result<Self, StorageError> {
        Ok(match config.storage {
            StorageMode::Local => Storage::Local(LocalSnapshotStorage::new(&config.local_path)),
            StorageMode::Remote => Storage::Remote(RemoteStorage::new(&config.api_url)?),
        })
    }
}

impl WeekStorage for Storage {
    async fn load(&self, week_key: &str) -> Result<Option<WeekRecord>, StorageError> {
        match self {
            Storage::Local(storage) => storage.load(week_key).await,
            Storage::Remote(storage) => storage.load(week_key).await,
        }
    }

    async fn save(&self, week_key: &str, record: &WeekRecord) -> Result<String, StorageError> {
        match self {
            Storage::Local(storage) => storage.save(week_key, record).await,
            Storage::Remote(storage) => storage.save(week_key, record).await,
        }
    }

    async fn list_weeks(&self) -> Result<Vec<String>, StorageError> {
        match self {
            Storage::Local(storage) => storage.list_weeks().await,
            Storage::Remote(storage) => storage.list_weeks().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_selects_variant() {
        let mut config = Config::default();
        assert!(matches!(Storage::from_config(&config), Ok(Storage::Remote(_))));

        config.storage = StorageMode::Local;
        config.local_path = "/tmp/sessions/snapshot.json".into();
        match Storage::from_config(&config) {
            Ok(Storage::Local(storage)) => assert_eq!(storage.path(), config.local_path.as_path()),
            other => panic!("expected local storage, got {other:?}"),
        }

        config.storage = StorageMode::Remote;
        config.api_url = "not a url".to_string();
        assert!(matches!(
            Storage::from_config(&config),
            Err(StorageError::InvalidUrl(_))
        ));
    }
}
