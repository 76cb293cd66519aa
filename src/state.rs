use crate::config::StorageMode;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub storage_mode: StorageMode,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, storage_mode: StorageMode, data: AppData) -> Self {
        Self {
            data_path,
            storage_mode,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
