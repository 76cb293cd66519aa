use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DAYS_PER_WEEK: usize = 7;
pub const BLOCK_COUNT: usize = 5;
pub const NEW_CHOICE_TEXT: &str = "New Choice";

pub type Completions = [bool; DAYS_PER_WEEK];
pub type DailyText = [String; DAYS_PER_WEEK];

/// A habit tracked per weekday. The completion row lives inside the choice,
/// so inserting or removing a choice always carries its row along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub text: String,
    pub completions: Completions,
}

impl Choice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            completions: [false; DAYS_PER_WEEK],
        }
    }

    pub fn completed_days(&self) -> usize {
        self.completions.iter().filter(|done| **done).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub description: String,
    pub choices: Vec<Choice>,
}

impl Block {
    fn seeded(name: &str, description: &str, choices: &[&str]) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
            choices: choices.iter().map(|text| Choice::new(*text)).collect(),
        }
    }

    /// Name without its leading ordinal, e.g. "1. Prime" becomes "Prime".
    pub fn label(&self) -> &str {
        match self.name.split_once(". ") {
            Some((ordinal, rest)) if ordinal.chars().all(|c| c.is_ascii_digit()) => rest,
            _ => &self.name,
        }
    }
}

pub fn default_blocks() -> Vec<Block> {
    vec![
        Block::seeded(
            "1. Prime",
            "Build Your Higher Self",
            &["Rise early", "God First", "Learn", "Exercise", "Meditation", "Nutrition"],
        ),
        Block::seeded(
            "2. Prosper",
            "Create and Monetize Value",
            &["DW#1 TCF", "DW#2 GrowTime AI", "DW#3 BubbleTech"],
        ),
        Block::seeded(
            "3. Play",
            "Enjoy the Best Things Life Has to Offer",
            &[
                "Quality Time With Loved Ones",
                "Fun",
                "Plan and Enjoy Transformational Experiences",
            ],
        ),
        Block::seeded(
            "4. Purpose",
            "Contribute Locally and Globally",
            &["Sagetown", "FUNDEMEX"],
        ),
        Block::seeded("5. Peace", "Wind Down, Rest Well", &["Meditation", "Sleep early"]),
    ]
}

/// Everything persisted for one calendar week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRecord {
    pub blocks: Vec<Block>,
    pub daily_value_creation: DailyText,
    pub daily_meditations: DailyText,
    pub daily_affirmations: String,
    pub guiding_principles: String,
}

impl Default for WeekRecord {
    fn default() -> Self {
        Self {
            blocks: default_blocks(),
            daily_value_creation: Default::default(),
            daily_meditations: Default::default(),
            daily_affirmations: String::new(),
            guiding_principles: String::new(),
        }
    }
}

impl WeekRecord {
    /// Numbers blocks by position and choices sequentially across the record.
    pub fn assign_ids(&mut self) {
        let mut next_choice = 1u64;
        for (index, block) in self.blocks.iter_mut().enumerate() {
            block.id = Some(index as u64 + 1);
            for choice in &mut block.choices {
                choice.id = Some(next_choice);
                next_choice += 1;
            }
        }
    }
}

/// Backend store contents, keyed by week key.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub weeks: BTreeMap<String, WeekRecord>,
}

/// `GET /api/data/{weekKey}` body.
pub type WeekDataResponse = WeekRecord;

/// `POST /api/data/{weekKey}` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWeekRequest {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub guiding_principles: String,
    #[serde(default)]
    pub daily_affirmations: String,
    pub daily_value_creation: DailyText,
    pub daily_meditations: DailyText,
}

impl From<SaveWeekRequest> for WeekRecord {
    fn from(request: SaveWeekRequest) -> Self {
        Self {
            blocks: request.blocks,
            daily_value_creation: request.daily_value_creation,
            daily_meditations: request.daily_meditations,
            daily_affirmations: request.daily_affirmations,
            guiding_principles: request.guiding_principles,
        }
    }
}

impl From<&WeekRecord> for SaveWeekRequest {
    fn from(record: &WeekRecord) -> Self {
        Self {
            blocks: record.blocks.clone(),
            guiding_principles: record.guiding_principles.clone(),
            daily_affirmations: record.daily_affirmations.clone(),
            daily_value_creation: record.daily_value_creation.clone(),
            daily_meditations: record.daily_meditations.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_has_five_blocks_with_empty_rows() {
        let record = WeekRecord::default();
        assert_eq!(record.blocks.len(), BLOCK_COUNT);
        assert_eq!(record.blocks[0].choices.len(), 6);
        assert!(
            record
                .blocks
                .iter()
                .flat_map(|block| &block.choices)
                .all(|choice| choice.completed_days() == 0)
        );
    }

    #[test]
    fn block_label_strips_ordinal() {
        let blocks = default_blocks();
        let labels: Vec<&str> = blocks.iter().map(Block::label).collect();
        assert_eq!(labels, ["Prime", "Prosper", "Play", "Purpose", "Peace"]);

        let plain = Block::seeded("Health. Body", "", &[]);
        assert_eq!(plain.label(), "Health. Body");
    }

    #[test]
    fn save_request_uses_camel_case_and_response_snake_case() {
        let record = WeekRecord::default();
        let request = serde_json::to_value(SaveWeekRequest::from(&record)).unwrap();
        assert!(request.get("dailyValueCreation").is_some());
        assert!(request.get("guidingPrinciples").is_some());

        let response = serde_json::to_value(&record).unwrap();
        assert!(response.get("daily_value_creation").is_some());
        assert!(response.get("guiding_principles").is_some());
    }

    #[test]
    fn completion_rows_must_have_seven_days() {
        let short = serde_json::json!({ "text": "Learn", "completions": [true, false] });
        assert!(serde_json::from_value::<Choice>(short).is_err());
    }

    #[test]
    fn assign_ids_numbers_choices_across_blocks() {
        let mut record = WeekRecord::default();
        record.assign_ids();
        assert_eq!(record.blocks[1].id, Some(2));
        assert_eq!(record.blocks[0].choices[0].id, Some(1));
        assert_eq!(record.blocks[1].choices[0].id, Some(7));
    }
}
