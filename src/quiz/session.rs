//! Quiz session state machine
//!
//! ```text
//! IDLE --start--> ACTIVE --answer/skip--> ACTIVE ... --last item--> COMPLETE (-> IDLE)
//! ```
//!
//! Each call loads the persisted state, performs one transition and writes
//! the result back, so consecutive CLI invocations continue one session.
//! Completion removes the state file.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use super::models::*;
use super::storage::QuizStateStorage;
use crate::config::ReviewSettings;
use crate::flashcards::selector::{due_cards, practice_pool};
use crate::flashcards::{FlashcardStorage, GeneratedPrompt, StudyItem};
use crate::storage::{Result, StorageError};

/// Drives a quiz over the card store
pub struct QuizSession<'a> {
    cards: &'a FlashcardStorage,
    state_store: &'a QuizStateStorage,
    settings: &'a ReviewSettings,
}

impl<'a> QuizSession<'a> {
    pub fn new(
        cards: &'a FlashcardStorage,
        state_store: &'a QuizStateStorage,
        settings: &'a ReviewSettings,
    ) -> Self {
        Self {
            cards,
            state_store,
            settings,
        }
    }

    /// Start a session over due cards, or over any cards in practice mode.
    ///
    /// An existing session is replaced. A limit of zero is rejected.
    pub fn start<R: Rng + ?Sized>(
        &self,
        practice: bool,
        limit: Option<usize>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<QuizResponse> {
        if limit == Some(0) {
            return Err(StorageError::Validation(
                "quiz limit must be at least 1".to_string(),
            ));
        }

        let cards = self.cards.list_cards()?;

        let (mode, selected) = if practice {
            let limit = limit.unwrap_or(self.settings.practice_limit);
            (QuizMode::Practice, practice_pool(&cards, now, limit, rng))
        } else {
            let mut due = due_cards(&cards, now);
            if let Some(limit) = limit {
                due.truncate(limit);
            }
            (QuizMode::Due, due)
        };

        if selected.is_empty() {
            return Ok(if practice {
                QuizResponse::NoCards
            } else {
                QuizResponse::NoCardsDue
            });
        }

        let queue = selected
            .into_iter()
            .map(|card| QuizItem::Card { id: card.id })
            .collect();
        self.begin(mode, queue, now)
    }

    /// Start a session of ad hoc prompts that are never scheduled
    pub fn start_prompts(
        &self,
        prompts: Vec<GeneratedPrompt>,
        now: DateTime<Utc>,
    ) -> Result<QuizResponse> {
        if prompts.is_empty() {
            return Ok(QuizResponse::NoCards);
        }
        let queue = prompts.into_iter().map(QuizItem::Prompt).collect();
        self.begin(QuizMode::Practice, queue, now)
    }

    fn begin(
        &self,
        mode: QuizMode,
        queue: VecDeque<QuizItem>,
        now: DateTime<Utc>,
    ) -> Result<QuizResponse> {
        let previous = self.state_store.load()?;
        if previous.is_active() {
            log::info!("Replacing quiz in progress");
        }

        let mut state = QuizState::new(mode, queue, now);
        match self.advance(&mut state)? {
            QuizNext::Question(question) => {
                self.state_store.save(&state)?;
                log::info!("Started {:?} quiz with {} item(s)", mode, state.total);
                Ok(QuizResponse::Started { question })
            }
            QuizNext::Complete(_) => {
                self.state_store.clear()?;
                Ok(QuizResponse::NoCards)
            }
        }
    }

    /// Reveal the answer to the current question and record the review.
    ///
    /// The session is advanced and saved before the card is scheduled.
    pub fn answer(&self, given: &str, now: DateTime<Utc>) -> Result<QuizResponse> {
        let mut state = self.state_store.load()?;
        let Some(item) = self.take_current(&mut state)? else {
            return Ok(QuizResponse::NoQuizInProgress);
        };

        let correct = answers_match(given, item.answer());
        state.answered += 1;
        if correct {
            state.correct += 1;
        }

        let next = self.advance(&mut state)?;
        self.persist(&state)?;

        let next_review = match item.as_card() {
            Some(card) => self.record_review(card.id, now)?,
            None => None,
        };

        Ok(QuizResponse::Answered {
            given: given.trim().to_string(),
            answer: item.answer().to_string(),
            correct,
            next_review,
            next,
        })
    }

    /// Move past the current question without scheduling it
    pub fn skip(&self) -> Result<QuizResponse> {
        let mut state = self.state_store.load()?;
        let Some(item) = self.take_current(&mut state)? else {
            return Ok(QuizResponse::NoQuizInProgress);
        };

        state.skipped += 1;

        let next = self.advance(&mut state)?;
        self.persist(&state)?;

        Ok(QuizResponse::Skipped {
            answer: item.answer().to_string(),
            next,
        })
    }

    /// Discard any session, returning to idle
    pub fn clear(&self) -> Result<()> {
        self.state_store.clear()?;
        log::info!("Cleared quiz state");
        Ok(())
    }

    /// The item awaiting an answer, if a session is active
    fn take_current(&self, state: &mut QuizState) -> Result<Option<StudyItem>> {
        if !state.is_active() {
            return Ok(None);
        }
        match state.current.take() {
            Some(item) => Ok(Some(item)),
            None => {
                log::warn!("Active quiz has no current item, clearing it");
                self.state_store.clear()?;
                Ok(None)
            }
        }
    }

    fn record_review(&self, card_id: Uuid, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        match self
            .cards
            .submit_review(card_id, self.settings.engaged_quality, now)
        {
            Ok(card) => Ok(Some(card.next_review)),
            Err(StorageError::CardNotFound(id)) => {
                log::warn!("Card {} was removed during the quiz, not scheduling it", id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Present the next queued item, or complete the session
    fn advance(&self, state: &mut QuizState) -> Result<QuizNext> {
        let deck = if state.queue.iter().any(|i| matches!(i, QuizItem::Card { .. })) {
            Some(self.cards.load()?)
        } else {
            None
        };

        while let Some(queued) = state.queue.pop_front() {
            let item = match queued {
                QuizItem::Prompt(prompt) => StudyItem::Generated(prompt),
                QuizItem::Card { id } => match deck.as_ref().and_then(|d| d.find(id)) {
                    Some(card) => StudyItem::Card(card.clone()),
                    None => {
                        log::warn!("Skipping card {} queued for quiz: no longer in store", id);
                        state.total = state.total.saturating_sub(1);
                        continue;
                    }
                },
            };

            state.position += 1;
            let question = QuestionView {
                mode: state.mode,
                position: state.position,
                total: state.total,
                question: item.question().to_string(),
                topic: item.as_card().map(|c| c.topic.clone()),
                source: item.source().map(str::to_string),
            };
            state.current = Some(item);
            return Ok(QuizNext::Question(question));
        }

        state.current = None;
        state.status = QuizStatus::Complete;
        Ok(QuizNext::Complete(state.summary()))
    }

    fn persist(&self, state: &QuizState) -> Result<()> {
        if state.is_active() {
            self.state_store.save(state)
        } else {
            log::info!(
                "Quiz complete: {} answered, {} skipped, {}/{} correct",
                state.answered,
                state.skipped,
                state.correct,
                state.total
            );
            self.state_store.clear()
        }
    }
}

/// Loose comparison of a typed answer with the card's answer
pub fn answers_match(given: &str, expected: &str) -> bool {
    let given = normalize_answer(given);
    !given.is_empty() && given == normalize_answer(expected)
}

fn normalize_answer(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?' | ',' | ';' | ':'))
        .to_string()
}
