//! Client-side controller: owns the tracker state and a storage adapter and
//! turns storage outcomes into user-facing notices.

use crate::storage::WeekStorage;
use crate::store::{self, Action, ActionError, TrackerState};
use chrono::NaiveDate;
use tracing::{error, info, warn};

pub const LOAD_FAILED: &str = "Failed to load data. Please try again.";
pub const SAVE_FAILED: &str = "Failed to save data. Please try again.";

/// What the user is told after a storage round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Nothing to report.
    Quiet,
    Info(String),
    Alert(String),
}

pub struct Session<S> {
    storage: S,
    state: TrackerState,
}

impl<S: WeekStorage> Session<S> {
    pub fn new(storage: S, today: NaiveDate) -> Self {
        Self {
            storage,
            state: TrackerState::new(today),
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Loads the current week, then refreshes the week list.
    pub async fn open(&mut self) -> Notice {
        let notice = self.load_current().await;
        self.refresh_weeks().await;
        notice
    }

    pub async fn select_date(&mut self, date: NaiveDate) -> Notice {
        self.apply(Action::SelectDate(date));
        self.load_current().await
    }

    pub fn dispatch(&mut self, action: Action) -> Result<(), ActionError> {
        let next = store::reduce(self.state.clone(), action)?;
        self.state = next;
        Ok(())
    }

    pub async fn save(&mut self) -> Notice {
        let week_key = self.state.week_key.clone();
        match self.storage.save(&week_key, &self.state.record).await {
            Ok(message) => {
                info!(week_key = %week_key, "week saved");
                self.refresh_weeks().await;
                Notice::Info(message)
            }
            Err(err) => {
                error!(week_key = %week_key, "error saving data: {err}");
                Notice::Alert(SAVE_FAILED.to_string())
            }
        }
    }

    pub async fn refresh_weeks(&mut self) {
        match self.storage.list_weeks().await {
            Ok(weeks) => self.apply(Action::SetAvailableWeeks(weeks)),
            Err(err) => error!("error loading available weeks: {err}"),
        }
    }

    // Not-found and failures share one alert; the state is left untouched.
    async fn load_current(&mut self) -> Notice {
        let week_key = self.state.week_key.clone();
        match self.storage.load(&week_key).await {
            Ok(Some(record)) => {
                self.apply(Action::LoadRecord(record));
                Notice::Quiet
            }
            Ok(None) => {
                warn!(week_key = %week_key, "no data stored for week");
                Notice::Alert(LOAD_FAILED.to_string())
            }
            Err(err) => {
                error!(week_key = %week_key, "error loading data: {err}");
                Notice::Alert(LOAD_FAILED.to_string())
            }
        }
    }

    // Used for actions without indices, which the reducer never rejects.
    fn apply(&mut self, action: Action) {
        if let Err(err) = self.dispatch(action) {
            warn!("ignored action: {err}");
        }
    }
}
