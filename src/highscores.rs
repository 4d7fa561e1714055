//! High score leaderboard system
//!
//! Persisted to a JSON file, tracks the top 5 runs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's name
    pub name: String,
    /// Player's score
    pub score: u64,
}

/// Failure to write the leaderboard
#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("failed to write high scores: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode high scores: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// High score leaderboard, sorted by descending score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: impl Into<String>, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.into(),
            score,
        };

        // Ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from disk; a missing or unreadable file is an empty board
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No high scores at {} ({}), starting fresh", path.display(), e);
                return Self::new();
            }
        };

        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                scores.normalize();
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high scores at {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Save high scores to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HighScoreError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Re-establish ordering and size after loading a hand-edited file
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "inferno-climb-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_add_keeps_descending_top_five() {
        let mut scores = HighScores::new();
        for (i, score) in [12, 40, 7, 33, 21, 50, 3].into_iter().enumerate() {
            scores.add_score(format!("p{}", i), score);
        }
        let values: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![50, 40, 33, 21, 12]);
        assert_eq!(scores.top_score(), Some(50));
    }

    #[test]
    fn test_rank_and_qualification() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("ana", 10), Some(1));
        assert_eq!(scores.add_score("bo", 30), Some(1));
        assert_eq!(scores.add_score("cy", 20), Some(2));
        assert_eq!(scores.potential_rank(25), Some(2));

        for s in [5, 6] {
            scores.add_score("filler", s);
        }
        assert!(!scores.qualifies(5));
        assert_eq!(scores.add_score("late", 4), None);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_zero_score_fills_empty_board() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("zero", 0), Some(1));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let scores = HighScores::load(temp_path("missing-never-written"));
        assert!(scores.is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "[{ this is not json").unwrap();
        assert!(HighScores::load(&path).is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved");
        let mut scores = HighScores::new();
        scores.add_score("ana", 17);
        scores.add_score("bo", 42);
        scores.save(&path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"name\": \"bo\""));

        let loaded = HighScores::load(&path);
        assert_eq!(loaded, scores);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_save_to_unwritable_path_errors() {
        let scores = HighScores::new();
        let result = scores.save("/nonexistent-dir/inferno-climb/scores.json");
        assert!(matches!(result, Err(HighScoreError::Io(_))));
    }
}
