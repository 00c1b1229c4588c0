use std::path::PathBuf;

use super::models::QuizState;
use crate::storage::{self, Result};

/// Storage for the in-progress quiz session (a single JSON file)
pub struct QuizStateStorage {
    state_path: PathBuf,
}

impl QuizStateStorage {
    pub fn new(state_path: PathBuf) -> Self {
        Self { state_path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.state_path
    }

    /// Load the session; no file means no session
    pub fn load(&self) -> Result<QuizState> {
        Ok(storage::read_json(&self.state_path)?.unwrap_or_default())
    }

    pub fn save(&self, state: &QuizState) -> Result<()> {
        storage::write_json(&self.state_path, state)
    }

    /// Discard any session, returning to idle
    pub fn clear(&self) -> Result<()> {
        storage::remove_file(&self.state_path)
    }
}
