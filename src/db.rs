use crate::errors::AppError;
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!(weeks = data.weeks.len(), "loaded week store");
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekRecord;

    #[tokio::test]
    async fn missing_or_garbled_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weeks.json");
        assert!(load_data(&path).await.weeks.is_empty());

        std::fs::write(&path, b"{ not json").unwrap();
        assert!(load_data(&path).await.weeks.is_empty());
    }

    #[tokio::test]
    async fn persisted_weeks_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weeks.json");
        let mut data = AppData::default();
        let mut record = WeekRecord::default();
        record.daily_meditations[1] = "Stillness".to_string();
        data.weeks.insert("January 6, 2025 - January 12, 2025".to_string(), record.clone());

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        assert_eq!(loaded.weeks.get("January 6, 2025 - January 12, 2025"), Some(&record));
    }
}
