//! Entry point for callers: cards, stats, reviews and quiz sessions over one
//! data directory.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::{RecallConfig, ReviewSettings, StorePaths};
use crate::flashcards::selector::{due_cards, random_card};
use crate::flashcards::stats::calculate_stats;
use crate::flashcards::{Card, CardDraft, FlashcardStorage, GeneratedPrompt, ReviewStats};
use crate::quiz::{QuizResponse, QuizSession, QuizState, QuizStateStorage};
use crate::storage::Result;

pub struct ReviewEngine {
    paths: StorePaths,
    settings: ReviewSettings,
    cards: FlashcardStorage,
    quiz_state: QuizStateStorage,
}

impl ReviewEngine {
    pub fn new(paths: StorePaths, settings: ReviewSettings) -> Self {
        Self {
            cards: FlashcardStorage::new(paths.cards_file.clone()),
            quiz_state: QuizStateStorage::new(paths.quiz_state_file.clone()),
            paths,
            settings,
        }
    }

    /// Open a data directory, reading its `config.toml` if present
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let paths = StorePaths::new(data_dir);
        let config = RecallConfig::load(&paths.config_file())?;
        Ok(Self::new(paths, config.review))
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn settings(&self) -> &ReviewSettings {
        &self.settings
    }

    fn quiz(&self) -> QuizSession<'_> {
        QuizSession::new(&self.cards, &self.quiz_state, &self.settings)
    }

    // ==================== Cards ====================

    pub fn add_card(&self, question: &str, answer: &str, topic: Option<&str>) -> Result<Card> {
        let mut draft = CardDraft::new(question, answer);
        draft.topic = topic.map(str::to_string);
        self.add_card_from(draft)
    }

    pub fn add_card_from(&self, draft: CardDraft) -> Result<Card> {
        self.cards.create_card(draft, Utc::now())
    }

    pub fn load_cards(&self) -> Result<Vec<Card>> {
        self.cards.list_cards()
    }

    pub fn get_card(&self, id: Uuid) -> Result<Card> {
        self.cards.get_card(id)
    }

    pub fn delete_card(&self, id: Uuid) -> Result<Card> {
        self.cards.delete_card(id)
    }

    pub fn due_cards(&self) -> Result<Vec<Card>> {
        Ok(due_cards(&self.cards.list_cards()?, Utc::now()))
    }

    pub fn get_random_card(&self, from_files: Option<&[String]>) -> Result<Option<Card>> {
        let cards = self.cards.list_cards()?;
        Ok(random_card(&cards, from_files, &mut rand::thread_rng()))
    }

    /// Record a review with an explicit quality (0-5)
    pub fn review_card(&self, id: Uuid, quality: u8) -> Result<Card> {
        self.cards.submit_review(id, quality, Utc::now())
    }

    /// Record a review with the configured "engaged" quality
    pub fn review_engaged(&self, id: Uuid) -> Result<Card> {
        self.review_card(id, self.settings.engaged_quality)
    }

    // ==================== Stats ====================

    pub fn get_stats(&self) -> Result<ReviewStats> {
        self.get_stats_at(Utc::now())
    }

    pub fn get_stats_at(&self, now: DateTime<Utc>) -> Result<ReviewStats> {
        let deck = self.cards.load()?;
        Ok(calculate_stats(&deck, now, self.settings.mastery_threshold))
    }

    // ==================== Quiz ====================

    pub fn quiz_start(&self, practice: bool, limit: Option<usize>) -> Result<QuizResponse> {
        self.quiz()
            .start(practice, limit, Utc::now(), &mut rand::thread_rng())
    }

    pub fn quiz_start_prompts(&self, prompts: Vec<GeneratedPrompt>) -> Result<QuizResponse> {
        self.quiz().start_prompts(prompts, Utc::now())
    }

    pub fn quiz_answer(&self, text: &str) -> Result<QuizResponse> {
        self.quiz().answer(text, Utc::now())
    }

    pub fn quiz_skip(&self) -> Result<QuizResponse> {
        self.quiz().skip()
    }

    pub fn quiz_state(&self) -> Result<QuizState> {
        self.quiz_state.load()
    }

    pub fn clear_quiz_state(&self) -> Result<()> {
        self.quiz().clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::algorithm::{MAX_INTERVAL_DAYS, MIN_INTERVAL_DAYS};
    use crate::quiz::QuizStatus;
    use crate::storage::StorageError;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_engine() -> (ReviewEngine, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let engine = ReviewEngine::open(temp_dir.path().to_path_buf()).unwrap();
        (engine, temp_dir)
    }

    #[test]
    fn test_add_and_load() {
        let (engine, _temp) = create_test_engine();

        let card = engine.add_card("Q1?", "A1", Some("dev")).unwrap();
        assert!(!card.id.is_nil());

        let cards = engine.load_cards().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "Q1?");
        assert_eq!(cards[0].answer, "A1");
        assert_eq!(cards[0].topic, "dev");
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let (engine, _temp) = create_test_engine();
        assert!(matches!(
            engine.add_card("", "A", None),
            Err(StorageError::Validation(_))
        ));
    }

    #[test]
    fn test_stats_on_empty_store() {
        let (engine, _temp) = create_test_engine();
        let stats = engine.get_stats().unwrap();
        assert_eq!(stats.total_cards, 0);
        assert_eq!(stats.due_today, 0);
        assert_eq!(stats.streak_days, 0);
        assert_eq!(stats.total_reviews, 0);
    }

    #[test]
    fn test_stats_after_add_and_review() {
        let (engine, _temp) = create_test_engine();
        let card = engine.add_card("Q?", "A", Some("general")).unwrap();
        engine.add_card("Q2?", "A2", None).unwrap();

        let before = engine.get_stats().unwrap();
        assert_eq!(before.total_cards, 2);
        assert_eq!(before.due_today, 2);
        assert_eq!(before.learning, 2);

        engine.review_card(card.id, 4).unwrap();
        let after = engine.get_stats().unwrap();
        assert_eq!(after.due_today, 1);
        assert_eq!(after.total_reviews, 1);
        assert_eq!(after.streak_days, 1);
    }

    #[test]
    fn test_mastery_threshold_from_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.toml"), "[review]\nmastery_threshold = 1\n").unwrap();
        let engine = ReviewEngine::open(temp.path().to_path_buf()).unwrap();

        let card = engine.add_card("Q?", "A", None).unwrap();
        engine.review_card(card.id, 5).unwrap();

        assert_eq!(engine.get_stats().unwrap().mastered, 1);
    }

    #[test]
    fn test_review_card_updates_schedule() {
        let (engine, _temp) = create_test_engine();
        let card = engine.add_card("Schedule Q?", "Schedule A", None).unwrap();

        let updated = engine.review_card(card.id, 4).unwrap();
        assert!(updated.next_review > card.next_review);
        assert!(updated.next_review > Utc::now());

        let lapsed = engine.review_card(card.id, 2).unwrap();
        assert_eq!(lapsed.repetitions, 0);
        assert_eq!(lapsed.interval_days, MIN_INTERVAL_DAYS);
        assert!(lapsed.next_review >= updated.next_review);
    }

    #[test]
    fn test_repeated_engaged_reviews_keep_working() {
        let (engine, _temp) = create_test_engine();
        let card = engine.add_card("Repeat Q?", "Repeat A", None).unwrap();

        let mut previous = card.next_review;
        for _ in 0..50 {
            let updated = engine.review_engaged(card.id).unwrap();
            assert!(updated.next_review >= previous);
            assert!(updated.interval_days <= MAX_INTERVAL_DAYS);
            previous = updated.next_review;
        }
        assert_eq!(engine.get_stats().unwrap().total_reviews, 50);
    }

    #[test]
    fn test_review_unknown_card() {
        let (engine, _temp) = create_test_engine();
        assert!(matches!(
            engine.review_card(Uuid::new_v4(), 4),
            Err(StorageError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_random_card_fallback() {
        let (engine, _temp) = create_test_engine();
        assert!(engine.get_random_card(None).unwrap().is_none());

        engine.add_card("Startup Q?", "Startup A", None).unwrap();
        let files = vec!["a.py".to_string()];
        let card = engine.get_random_card(Some(&files)).unwrap().unwrap();
        assert_eq!(card.question, "Startup Q?");
    }

    #[test]
    fn test_quiz_flow_through_engine() {
        let (engine, _temp) = create_test_engine();

        let empty = engine.quiz_start(false, None).unwrap();
        assert!(empty.to_string().contains("No cards due"));
        assert!(engine
            .quiz_answer("x")
            .unwrap()
            .to_string()
            .contains("No quiz in progress"));

        engine.add_card("Practice Q?", "Practice A", Some("concept")).unwrap();
        engine.add_card("Practice Q2?", "Practice A2", Some("tool")).unwrap();

        let start = engine.quiz_start(true, Some(2)).unwrap();
        assert!(start.to_string().contains("PRACTICE"));
        assert!(start.to_string().contains("Q: Practice"));
        assert_eq!(engine.quiz_state().unwrap().status, QuizStatus::Active);

        engine.quiz_answer("first").unwrap();
        let done = engine.quiz_answer("second").unwrap();
        assert!(done.to_string().contains("QUIZ COMPLETE"));
        assert_eq!(done.summary().unwrap().answered, 2);
        assert_eq!(engine.get_stats().unwrap().total_reviews, 2);
    }

    #[test]
    fn test_clear_quiz_state() {
        let (engine, _temp) = create_test_engine();
        engine.add_card("Q?", "A", None).unwrap();
        engine.quiz_start(false, None).unwrap();

        engine.clear_quiz_state().unwrap();

        assert_eq!(engine.quiz_state().unwrap().status, QuizStatus::Idle);
        assert!(engine
            .quiz_skip()
            .unwrap()
            .to_string()
            .contains("No quiz in progress"));
    }

    #[test]
    fn test_ad_hoc_prompts() {
        let (engine, _temp) = create_test_engine();
        let prompt = GeneratedPrompt {
            question: "Which file held the quiz loop?".to_string(),
            answer: "session.rs".to_string(),
            source: None,
        };

        let start = engine.quiz_start_prompts(vec![prompt]).unwrap();
        assert!(start.to_string().contains("Q: Which file held the quiz loop?"));

        let done = engine.quiz_answer("session.rs").unwrap();
        assert_eq!(done.summary().unwrap().correct, 1);
        assert_eq!(engine.get_stats().unwrap().total_reviews, 0);
    }
}
