use super::{StorageError, WeekStorage};
use crate::models::{MessageResponse, SaveWeekRequest, WeekDataResponse, WeekRecord};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, error, info};

/// Client for the week-keyed REST backend.
#[derive(Debug, Clone)]
pub struct RemoteStorage {
    client: Client,
    base_url: Url,
}

impl RemoteStorage {
    pub fn new(base_url: &str) -> Result<Self, StorageError> {
        let base_url =
            Url::parse(base_url).map_err(|err| StorageError::InvalidUrl(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    // The week key is pushed as a single segment so it gets percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StorageError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl WeekStorage for RemoteStorage {
    async fn load(&self, week_key: &str) -> Result<Option<WeekRecord>, StorageError> {
        let url = self.endpoint(&["api", "data", week_key])?;
        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(week_key, "no remote record");
                Ok(None)
            }
            status if status.is_success() => {
                let data: WeekDataResponse = response.json().await?;
                Ok(Some(data))
            }
            status => {
                error!(week_key, %status, "failed to load week");
                Err(StorageError::Status(status.as_u16()))
            }
        }
    }

    async fn save(&self, week_key: &str, record: &WeekRecord) -> Result<String, StorageError> {
        let url = self.endpoint(&["api", "data", week_key])?;
        let response = self
            .client
            .post(url)
            .json(&SaveWeekRequest::from(record))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            error!(week_key, %status, "failed to save week");
            return Err(StorageError::Status(status.as_u16()));
        }
        let body: MessageResponse = response.json().await?;
        info!(week_key, "saved week remotely");
        Ok(body.message)
    }

    async fn list_weeks(&self) -> Result<Vec<String>, StorageError> {
        let url = self.endpoint(&["api", "weeks"])?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_week_key_as_one_segment() {
        let storage = RemoteStorage::new("http://127.0.0.1:5000").unwrap();
        let url = storage
            .endpoint(&["api", "data", "January 6, 2025 - January 12, 2025"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5000/api/data/January%206,%202025%20-%20January%2012,%202025"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let storage = RemoteStorage::new("http://example.test/tracker/").unwrap();
        let url = storage.endpoint(&["api", "weeks"]).unwrap();
        assert_eq!(url.as_str(), "http://example.test/tracker/api/weeks");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            RemoteStorage::new("mailto:someone@example.test"),
            Err(StorageError::InvalidUrl(_))
        ));
        assert!(matches!(
            RemoteStorage::new("not a url"),
            Err(StorageError::InvalidUrl(_))
        ));
    }
}
