//! The last card shown by `pick`, kept so `reveal` answers the same one

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use recall_lib::storage::{read_json, write_json};
use recall_lib::StudyItem;

/// How the cached card was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PickSource {
    /// Related to one of the given files
    RecentWork,
    /// Any card
    Random,
}

impl PickSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RecentWork => "from recent work",
            Self::Random => "random review",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCache {
    pub item: StudyItem,
    pub picked_by: PickSource,
    pub timestamp: DateTime<Utc>,
}

impl QuizCache {
    /// Save the picked card; failing to cache is not fatal for `pick`
    pub fn save(&self, path: &Path) {
        if let Err(e) = write_json(path, self) {
            log::warn!("Failed to write quiz cache {:?}: {}", path, e);
        }
    }

    /// Load the cached card, treating unreadable content as no card
    pub fn load(path: &Path) -> Option<Self> {
        match read_json(path) {
            Ok(cache) => cache,
            Err(e) => {
                log::warn!("Ignoring unreadable quiz cache {:?}: {}", path, e);
                None
            }
        }
    }
}
