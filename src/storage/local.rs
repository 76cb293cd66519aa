use super::{StorageError, WeekStorage};
use crate::models::{Block, Choice, Completions, DailyText, WeekRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const BLOCKS_KEY: &str = "blocks";
const COMPLETED_KEY: &str = "completedChoices";
const VALUE_CREATION_KEY: &str = "dailyValueCreation";
const SAVED_MESSAGE: &str = "Data saved successfully!";

/// Key-value blob store shaped like browser local storage: one JSON file
/// mapping keys to JSON-encoded strings.
///
/// The snapshot is not scoped by week. Whatever week key is passed to
/// `load` or `save` is ignored, so there is only ever one snapshot.
/// Meditations, affirmations and guiding principles are not part of it.
#[derive(Debug, Clone)]
pub struct LocalSnapshotStorage {
    path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotBlock {
    name: String,
    description: String,
    choices: Vec<String>,
}

impl LocalSnapshotStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_items(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_items(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let payload = serde_json::to_vec_pretty(items)?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }
}

impl WeekStorage for LocalSnapshotStorage {
    async fn load(&self, week_key: &str) -> Result<Option<WeekRecord>, StorageError> {
        let items = self.read_items().await?;
        let (Some(blocks), Some(completed), Some(value_creation)) = (
            items.get(BLOCKS_KEY),
            items.get(COMPLETED_KEY),
            items.get(VALUE_CREATION_KEY),
        ) else {
            debug!(week_key, "local snapshot incomplete");
            return Ok(None);
        };

        let blocks: Vec<SnapshotBlock> = serde_json::from_str(blocks)?;
        let completed: Vec<Vec<Vec<bool>>> = serde_json::from_str(completed)?;
        let value_creation: Vec<String> = serde_json::from_str(value_creation)?;

        let record = WeekRecord {
            blocks: merge_blocks(blocks, completed)?,
            daily_value_creation: daily_text(value_creation)?,
            ..WeekRecord::default()
        };
        debug!(week_key, "loaded local snapshot");
        Ok(Some(record))
    }

    async fn save(&self, week_key: &str, record: &WeekRecord) -> Result<String, StorageError> {
        let blocks: Vec<SnapshotBlock> = record
            .blocks
            .iter()
            .map(|block| SnapshotBlock {
                name: block.name.clone(),
                description: block.description.clone(),
                choices: block.choices.iter().map(|choice| choice.text.clone()).collect(),
            })
            .collect();
        let completed: Vec<Vec<Completions>> = record
            .blocks
            .iter()
            .map(|block| block.choices.iter().map(|choice| choice.completions).collect())
            .collect();

        let mut items = self.read_items().await?;
        items.insert(BLOCKS_KEY.to_string(), serde_json::to_string(&blocks)?);
        items.insert(COMPLETED_KEY.to_string(), serde_json::to_string(&completed)?);
        items.insert(
            VALUE_CREATION_KEY.to_string(),
            serde_json::to_string(&record.daily_value_creation)?,
        );
        self.write_items(&items).await?;

        info!(week_key, path = %self.path.display(), "saved local snapshot");
        Ok(SAVED_MESSAGE.to_string())
    }

    async fn list_weeks(&self) -> Result<Vec<String>, StorageError> {
        Ok(Vec::new())
    }
}

fn merge_blocks(
    blocks: Vec<SnapshotBlock>,
    completed: Vec<Vec<Vec<bool>>>,
) -> Result<Vec<Block>, StorageError> {
    if blocks.len() != completed.len() {
        return Err(StorageError::Corrupt(format!(
            "{} blocks but {} completion grids",
            blocks.len(),
            completed.len()
        )));
    }

    blocks
        .into_iter()
        .zip(completed)
        .map(|(block, rows)| {
            if block.choices.len() != rows.len() {
                return Err(StorageError::Corrupt(format!(
                    "block '{}' has {} choices but {} completion rows",
                    block.name,
                    block.choices.len(),
                    rows.len()
                )));
            }
            let choices = block
                .choices
                .into_iter()
                .zip(rows)
                .map(|(text, row)| {
                    let completions: Completions = row.try_into().map_err(|row: Vec<bool>| {
                        StorageError::Corrupt(format!(
                            "choice '{text}' has {} days instead of 7",
                            row.len()
                        ))
                    })?;
                    Ok(Choice {
                        id: None,
                        text,
                        completions,
                    })
                })
                .collect::<Result<Vec<_>, StorageError>>()?;
            Ok(Block {
                id: None,
                name: block.name,
                description: block.description,
                choices,
            })
        })
        .collect()
}

fn daily_text(entries: Vec<String>) -> Result<DailyText, StorageError> {
    entries.try_into().map_err(|entries: Vec<String>| {
        StorageError::Corrupt(format!("{} daily entries instead of 7", entries.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::week::week_key;
    use chrono::NaiveDate;

    fn storage(dir: &tempfile::TempDir) -> LocalSnapshotStorage {
        LocalSnapshotStorage::new(dir.path().join("nested").join("local_storage.json"))
    }

    fn edited_record() -> WeekRecord {
        let mut record = WeekRecord::default();
        record.blocks[0].choices[1].text = "Pray".to_string();
        record.blocks[0].choices[1].completions[2] = true;
        record.blocks[2].choices.pop();
        record.daily_value_creation[3] = "Wrote the proposal".to_string();
        record
    }

    #[tokio::test]
    async fn empty_store_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);
        assert!(store.load("any").await.unwrap().is_none());
        assert!(store.list_weeks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn round_trip_keeps_choices_rows_and_value_creation() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);
        let record = edited_record();

        let message = store.save("week", &record).await.unwrap();
        assert_eq!(message, "Data saved successfully!");

        let loaded = store.load("week").await.unwrap().unwrap();
        assert_eq!(loaded.blocks, record.blocks);
        assert_eq!(loaded.daily_value_creation, record.daily_value_creation);
    }

    #[tokio::test]
    async fn snapshot_ignores_week_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);
        let january = week_key(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
        let march = week_key(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());

        store.save(&january, &edited_record()).await.unwrap();
        let from_march = store.load(&march).await.unwrap().unwrap();
        let from_january = store.load(&january).await.unwrap().unwrap();
        assert_eq!(from_march, from_january);
    }

    #[tokio::test]
    async fn journal_fields_outside_snapshot_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);
        let mut record = edited_record();
        record.daily_meditations[0] = "Breath".to_string();
        record.daily_affirmations = "Calm".to_string();
        record.guiding_principles = "Truth".to_string();

        store.save("week", &record).await.unwrap();
        let loaded = store.load("week").await.unwrap().unwrap();
        assert_eq!(loaded.daily_meditations, DailyText::default());
        assert!(loaded.daily_affirmations.is_empty());
        assert!(loaded.guiding_principles.is_empty());
    }

    #[tokio::test]
    async fn stores_the_three_browser_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);
        store.save("week", &WeekRecord::default()).await.unwrap();

        let raw = std::fs::read(store.path()).unwrap();
        let items: BTreeMap<String, String> = serde_json::from_slice(&raw).unwrap();
        let keys: Vec<&str> = items.keys().map(String::as_str).collect();
        assert_eq!(keys, ["blocks", "completedChoices", "dailyValueCreation"]);

        let grid: Vec<Vec<Vec<bool>>> = serde_json::from_str(&items["completedChoices"]).unwrap();
        assert_eq!(grid[0].len(), 6);
        assert!(grid.iter().flatten().all(|row| row.len() == 7));
    }

    #[tokio::test]
    async fn mismatched_rows_are_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = storage(&dir);
        let mut items = BTreeMap::new();
        items.insert(
            BLOCKS_KEY.to_string(),
            r#"[{"name":"1. Prime","description":"","choices":["Learn","Read"]}]"#.to_string(),
        );
        items.insert(COMPLETED_KEY.to_string(), "[[[true,false,false,false,false,false,false]]]".to_string());
        items.insert(VALUE_CREATION_KEY.to_string(), r#"["","","","","","",""]"#.to_string());
        store.write_items(&items).await.unwrap();

        let err = store.load("week").await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
