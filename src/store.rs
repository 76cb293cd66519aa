//! In-memory tracker state and the reducer that mutates it.
//!
//! Every UI interaction is expressed as an [`Action`]. [`reduce`] takes the
//! whole state by value and hands back the next one, so a rejected action
//! never leaves a partial update behind.

use crate::models::{Block, Choice, DAYS_PER_WEEK, NEW_CHOICE_TEXT, WeekRecord};
use crate::week;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerState {
    pub selected_date: NaiveDate,
    pub week_key: String,
    pub record: WeekRecord,
    pub available_weeks: Vec<String>,
}

impl TrackerState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_date: today,
            week_key: week::week_key(today),
            record: WeekRecord::default(),
            available_weeks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddChoice { block: usize },
    EditChoice { block: usize, choice: usize, text: String },
    DeleteChoice { block: usize, choice: usize },
    ToggleCompletion { block: usize, choice: usize, day: usize },
    SetValueCreation { day: usize, text: String },
    SetMeditation { day: usize, text: String },
    SetAffirmations(String),
    SetGuidingPrinciples(String),
    SelectDate(NaiveDate),
    LoadRecord(WeekRecord),
    SetAvailableWeeks(Vec<String>),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("no block at index {0}")]
    BlockOutOfRange(usize),
    #[error("block {block} has no choice at index {choice}")]
    ChoiceOutOfRange { block: usize, choice: usize },
    #[error("day index {0} is outside Monday..Sunday")]
    DayOutOfRange(usize),
}

pub fn reduce(mut state: TrackerState, action: Action) -> Result<TrackerState, ActionError> {
    let record = &mut state.record;
    match action {
        Action::AddChoice { block } => {
            block_mut(record, block)?.choices.push(Choice::new(NEW_CHOICE_TEXT));
        }
        Action::EditChoice { block, choice, text } => {
            choice_mut(record, block, choice)?.text = text;
        }
        Action::DeleteChoice { block, choice } => {
            let choices = &mut block_mut(record, block)?.choices;
            if choice >= choices.len() {
                return Err(ActionError::ChoiceOutOfRange { block, choice });
            }
            choices.remove(choice);
        }
        Action::ToggleCompletion { block, choice, day } => {
            check_day(day)?;
            let cell = &mut choice_mut(record, block, choice)?.completions[day];
            *cell = !*cell;
        }
        Action::SetValueCreation { day, text } => {
            check_day(day)?;
            record.daily_value_creation[day] = text;
        }
        Action::SetMeditation { day, text } => {
            check_day(day)?;
            record.daily_meditations[day] = text;
        }
        Action::SetAffirmations(text) => record.daily_affirmations = text,
        Action::SetGuidingPrinciples(text) => record.guiding_principles = text,
        Action::SelectDate(date) => {
            state.selected_date = date;
            state.week_key = week::week_key(date);
        }
        Action::LoadRecord(loaded) => state.record = loaded,
        Action::SetAvailableWeeks(weeks) => state.available_weeks = weeks,
    }
    Ok(state)
}

fn block_mut(record: &mut WeekRecord, block: usize) -> Result<&mut Block, ActionError> {
    record
        .blocks
        .get_mut(block)
        .ok_or(ActionError::BlockOutOfRange(block))
}

fn choice_mut(record: &mut WeekRecord, block: usize, choice: usize) -> Result<&mut Choice, ActionError> {
    block_mut(record, block)?
        .choices
        .get_mut(choice)
        .ok_or(ActionError::ChoiceOutOfRange { block, choice })
}

fn check_day(day: usize) -> Result<(), ActionError> {
    if day < DAYS_PER_WEEK {
        Ok(())
    } else {
        Err(ActionError::DayOutOfRange(day))
    }
}
