use crate::models::{Block, DAYS_PER_WEEK, WeekRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStats {
    pub total_completed: usize,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockScore {
    pub name: String,
    pub label: String,
    pub total_completed: usize,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekStats {
    pub blocks: Vec<BlockScore>,
}

pub fn block_stats(block: &Block) -> BlockStats {
    let total_completed: usize = block.choices.iter().map(|choice| choice.completed_days()).sum();
    let cells = block.choices.len() * DAYS_PER_WEEK;
    BlockStats {
        total_completed,
        score: percentage(total_completed, cells),
    }
}

pub fn week_stats(record: &WeekRecord) -> WeekStats {
    let blocks = record
        .blocks
        .iter()
        .map(|block| {
            let stats = block_stats(block);
            BlockScore {
                name: block.name.clone(),
                label: block.label().to_string(),
                total_completed: stats.total_completed,
                score: stats.score,
            }
        })
        .collect();
    WeekStats { blocks }
}

// Half-up rounding in integers; 0 when there is nothing to complete.
fn percentage(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    ((200 * done + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Choice;

    fn block_with(rows: &[[bool; 7]]) -> Block {
        Block {
            id: None,
            name: "1. Prime".to_string(),
            description: String::new(),
            choices: rows
                .iter()
                .map(|row| Choice {
                    completions: *row,
                    ..Choice::new("habit")
                })
                .collect(),
        }
    }

    #[test]
    fn empty_block_scores_zero() {
        let stats = block_stats(&block_with(&[]));
        assert_eq!(stats, BlockStats { total_completed: 0, score: 0 });
    }

    #[test]
    fn score_rounds_to_nearest_percent() {
        let mut row = [false; 7];
        row[0] = true;
        // 1 of 7 is 14.28%
        assert_eq!(block_stats(&block_with(&[row])).score, 14);

        let mut rows = [[false; 7]; 2];
        rows[0] = [true; 7];
        rows[1][0] = true;
        // 8 of 14 is 57.14%
        let stats = block_stats(&block_with(&rows));
        assert_eq!(stats.total_completed, 8);
        assert_eq!(stats.score, 57);

        // 1 of 2 rows done half-way: 7 of 14 is exactly 50%
        rows[1] = [false; 7];
        assert_eq!(block_stats(&block_with(&rows)).score, 50);
    }

    #[test]
    fn score_stays_within_bounds() {
        let grids: [&[[bool; 7]]; 4] = [&[], &[[false; 7]], &[[true; 7]], &[[true; 7], [true; 7], [false; 7]]];
        for grid in grids {
            let score = block_stats(&block_with(grid)).score;
            assert!(score <= 100);
        }
        assert_eq!(block_stats(&block_with(&[[true; 7]])).score, 100);
    }

    #[test]
    fn week_stats_labels_each_block() {
        let mut record = WeekRecord::default();
        record.blocks[4].choices[0].completions = [true; 7];
        let stats = week_stats(&record);
        assert_eq!(stats.blocks.len(), 5);
        assert_eq!(stats.blocks[4].label, "Peace");
        assert_eq!(stats.blocks[4].total_completed, 7);
        assert_eq!(stats.blocks[4].score, 50);
        assert_eq!(stats.blocks[0].score, 0);
    }
}
