//! Data locations and review settings
//!
//! Everything lives under one data directory:
//! ```text
//! {data_dir}/
//! ├── flashcards.json      # Cards and review log
//! ├── .quiz_state.json     # In-progress quiz session
//! ├── .current_quiz.json   # Last card shown by `pick`
//! └── config.toml          # Optional review settings
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::storage::{Result, StorageError};

/// File locations for the card store and quiz state
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub data_dir: PathBuf,
    pub cards_file: PathBuf,
    pub quiz_state_file: PathBuf,
    pub quiz_cache_file: PathBuf,
}

impl StorePaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            cards_file: data_dir.join("flashcards.json"),
            quiz_state_file: data_dir.join(".quiz_state.json"),
            quiz_cache_file: data_dir.join(".current_quiz.json"),
            data_dir,
        }
    }

    /// Default data directory (e.g. ~/.local/share/recall)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("recall"))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }
}

/// Top-level `config.toml` contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    pub review: ReviewSettings,
}

/// Tunables for stats and quiz sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSettings {
    /// Consecutive passes at which a card counts as mastered
    pub mastery_threshold: u32,
    /// Cards per practice session when no limit is given
    pub practice_limit: usize,
    /// Quality recorded when a quiz answer or reveal is counted as a review
    pub engaged_quality: u8,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            mastery_threshold: 5,
            practice_limit: 5,
            engaged_quality: 4,
        }
    }
}

impl RecallConfig {
    /// Load `config.toml`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: RecallConfig = toml::from_str(&content)
            .map_err(|e| StorageError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.review.engaged_quality > 5 {
            return Err(StorageError::Config(format!(
                "engaged_quality must be 0-5, got {}",
                self.review.engaged_quality
            )));
        }
        if self.review.practice_limit == 0 {
            return Err(StorageError::Config(
                "practice_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
