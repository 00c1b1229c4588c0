//! Storage operations for flashcards
//!
//! All cards and the review log live in a single JSON document that is
//! rewritten whole on every change:
//! ```text
//! {data_dir}/flashcards.json
//! {
//!   "cards": [ {card}, ... ],
//!   "reviewLog": [ {review record}, ... ]
//! }
//! ```

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::algorithm::{self, MAX_QUALITY};
use super::models::*;
use crate::storage::{self, Result, StorageError};

/// Fields for a new card
#[derive(Debug, Clone, Default)]
pub struct CardDraft {
    pub question: String,
    pub answer: String,
    pub topic: Option<String>,
    pub source: Option<String>,
}

impl CardDraft {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ..Default::default()
        }
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Storage manager for flashcard operations
pub struct FlashcardStorage {
    cards_path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FlashcardStorage {
    pub fn new(cards_path: PathBuf) -> Self {
        Self {
            cards_path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.cards_path
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load the full deck; a missing or empty file is an empty deck
    pub fn load(&self) -> Result<CardDeck> {
        Ok(storage::read_json(&self.cards_path)?.unwrap_or_default())
    }

    /// Overwrite the persisted deck
    pub fn save(&self, deck: &CardDeck) -> Result<()> {
        let _guard = self.lock();
        storage::write_json(&self.cards_path, deck)
    }

    // ==================== Card Operations ====================

    /// List all cards in insertion order
    pub fn list_cards(&self) -> Result<Vec<Card>> {
        Ok(self.load()?.cards)
    }

    /// Get a specific card
    pub fn get_card(&self, card_id: Uuid) -> Result<Card> {
        self.load()?
            .find(card_id)
            .cloned()
            .ok_or(StorageError::CardNotFound(card_id))
    }

    /// Create a new card
    pub fn create_card(&self, draft: CardDraft, now: DateTime<Utc>) -> Result<Card> {
        let question = draft.question.trim();
        let answer = draft.answer.trim();
        if question.is_empty() {
            return Err(StorageError::Validation("question must not be empty".to_string()));
        }
        if answer.is_empty() {
            return Err(StorageError::Validation("answer must not be empty".to_string()));
        }

        let mut card = Card::new(question.to_string(), answer.to_string(), draft.topic, now);
        card.source = draft
            .source
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let _guard = self.lock();
        let mut deck = self.load()?;
        deck.cards.push(card.clone());
        storage::write_json(&self.cards_path, &deck)?;

        log::info!("Created card {} ({})", card.id, card.topic);
        Ok(card)
    }

    /// Delete a card; its review history is kept for streaks
    pub fn delete_card(&self, card_id: Uuid) -> Result<Card> {
        let _guard = self.lock();
        let mut deck = self.load()?;
        let pos = deck
            .cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or(StorageError::CardNotFound(card_id))?;

        let card = deck.cards.remove(pos);
        storage::write_json(&self.cards_path, &deck)?;

        log::info!("Deleted card {}", card_id);
        Ok(card)
    }

    // ==================== Review Operations ====================

    /// Submit a review for a card and persist the new schedule
    pub fn submit_review(&self, card_id: Uuid, quality: u8, now: DateTime<Utc>) -> Result<Card> {
        if quality > MAX_QUALITY {
            return Err(StorageError::Validation(format!(
                "quality must be between 0 and {}, got {}",
                MAX_QUALITY, quality
            )));
        }

        let _guard = self.lock();
        let mut deck = self.load()?;
        let pos = deck
            .cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or(StorageError::CardNotFound(card_id))?;

        let updated = algorithm::review(&deck.cards[pos], quality, now);
        deck.review_log.push(ReviewRecord::new(&updated, quality, now));
        deck.cards[pos] = updated.clone();

        storage::write_json(&self.cards_path, &deck)?;

        log::debug!(
            "Reviewed card {} with quality {}: interval {}d, ease {:.2}, next {}",
            card_id,
            quality,
            updated.interval_days,
            updated.ease_factor,
            updated.next_review
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_storage() -> (FlashcardStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FlashcardStorage::new(temp_dir.path().join("flashcards.json"));
        (storage, temp_dir)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.list_cards().unwrap().is_empty());
        assert!(storage.load().unwrap().review_log.is_empty());
    }

    #[test]
    fn test_empty_file_is_empty() {
        let (storage, _temp) = create_test_storage();
        fs::write(storage.path(), "").unwrap();
        assert!(storage.list_cards().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let (storage, _temp) = create_test_storage();
        fs::write(storage.path(), "[[[").unwrap();

        assert!(matches!(
            storage.list_cards(),
            Err(StorageError::CorruptState { .. })
        ));
        // The damaged file is left untouched
        assert!(storage.create_card(CardDraft::new("Q?", "A"), now()).is_err());
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "[[[");
    }

    #[test]
    fn test_create_and_get_card() {
        let (storage, _temp) = create_test_storage();

        let card = storage
            .create_card(CardDraft::new("Q1?", "A1").topic("dev").source("src/lib.rs"), now())
            .unwrap();
        assert_eq!(card.created_at, now());
        assert_eq!(card.next_review, now());

        let cards = storage.list_cards().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "Q1?");
        assert_eq!(cards[0].answer, "A1");
        assert_eq!(cards[0].topic, "dev");
        assert_eq!(cards[0].source.as_deref(), Some("src/lib.rs"));

        let fetched = storage.get_card(card.id).unwrap();
        assert_eq!(fetched, card);
    }

    #[test]
    fn test_cards_keep_insertion_order() {
        let (storage, _temp) = create_test_storage();
        for i in 0..4 {
            storage
                .create_card(CardDraft::new(format!("Q{}", i), "A"), now())
                .unwrap();
        }

        let questions: Vec<String> = storage
            .list_cards()
            .unwrap()
            .into_iter()
            .map(|c| c.question)
            .collect();
        assert_eq!(questions, vec!["Q0", "Q1", "Q2", "Q3"]);
    }

    #[test]
    fn test_empty_question_or_answer_rejected() {
        let (storage, _temp) = create_test_storage();

        assert!(matches!(
            storage.create_card(CardDraft::new("  ", "A"), now()),
            Err(StorageError::Validation(_))
        ));
        assert!(matches!(
            storage.create_card(CardDraft::new("Q?", ""), now()),
            Err(StorageError::Validation(_))
        ));
        assert!(storage.list_cards().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_card_not_found() {
        let (storage, _temp) = create_test_storage();
        let id = Uuid::new_v4();

        assert!(matches!(storage.get_card(id), Err(StorageError::CardNotFound(x)) if x == id));
        assert!(matches!(
            storage.submit_review(id, 4, now()),
            Err(StorageError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_review_updates_schedule_and_log() {
        let (storage, _temp) = create_test_storage();
        let card = storage.create_card(CardDraft::new("Q?", "A"), now()).unwrap();

        let updated = storage.submit_review(card.id, 4, now()).unwrap();
        assert!(updated.next_review > card.next_review);
        assert_eq!(updated.repetitions, 1);
        assert_eq!(updated.last_review, Some(now()));

        let deck = storage.load().unwrap();
        assert_eq!(deck.cards[0], updated);
        assert_eq!(deck.review_log.len(), 1);
        assert_eq!(deck.review_log[0].card_id, card.id);
        assert_eq!(deck.review_log[0].quality, 4);
    }

    #[test]
    fn test_lapse_resets_card() {
        let (storage, _temp) = create_test_storage();
        let card = storage.create_card(CardDraft::new("Q?", "A"), now()).unwrap();

        storage.submit_review(card.id, 5, now()).unwrap();
        storage
            .submit_review(card.id, 5, now() + Duration::days(1))
            .unwrap();
        let lapsed = storage
            .submit_review(card.id, 1, now() + Duration::days(7))
            .unwrap();

        assert_eq!(lapsed.repetitions, 0);
        assert_eq!(lapsed.interval_days, algorithm::MIN_INTERVAL_DAYS);
    }

    #[test]
    fn test_out_of_range_quality_rejected() {
        let (storage, _temp) = create_test_storage();
        let card = storage.create_card(CardDraft::new("Q?", "A"), now()).unwrap();

        assert!(matches!(
            storage.submit_review(card.id, 6, now()),
            Err(StorageError::Validation(_))
        ));
        assert!(storage.load().unwrap().review_log.is_empty());
    }

    #[test]
    fn test_delete_card_keeps_review_log() {
        let (storage, _temp) = create_test_storage();
        let card = storage.create_card(CardDraft::new("Q?", "A"), now()).unwrap();
        storage.submit_review(card.id, 4, now()).unwrap();

        storage.delete_card(card.id).unwrap();

        let deck = storage.load().unwrap();
        assert!(deck.cards.is_empty());
        assert_eq!(deck.review_log.len(), 1);
        assert!(matches!(
            storage.delete_card(card.id),
            Err(StorageError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let (storage, _temp) = create_test_storage();
        let storage = Arc::new(storage);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let storage = Arc::clone(&storage);
                std::thread::spawn(move || {
                    storage
                        .create_card(CardDraft::new(format!("Q{}", i), "A"), Utc::now())
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(storage.list_cards().unwrap().len(), 8);
    }
}
