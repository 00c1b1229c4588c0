pub mod config;
pub mod engine;
pub mod flashcards;
pub mod quiz;
pub mod storage;

pub use config::{RecallConfig, ReviewSettings, StorePaths};
pub use engine::ReviewEngine;
pub use flashcards::{Card, CardDraft, GeneratedPrompt, ReviewStats, StudyItem};
pub use quiz::{QuizResponse, QuizStatus};
pub use storage::StorageError;
