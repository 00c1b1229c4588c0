//! Quiz session state and the responses shown to the user

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flashcards::{GeneratedPrompt, StudyItem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Only cards that are due
    #[default]
    Due,
    /// Any cards, outside the normal schedule
    Practice,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    #[default]
    Idle,
    Active,
    Complete,
}

/// A queued question, resolved against the card store when presented
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QuizItem {
    Card { id: Uuid },
    Prompt(GeneratedPrompt),
}

/// Persisted quiz session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizState {
    #[serde(default)]
    pub status: QuizStatus,
    #[serde(default)]
    pub mode: QuizMode,
    /// Items not yet presented
    #[serde(default)]
    pub queue: VecDeque<QuizItem>,
    /// The item currently awaiting an answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<StudyItem>,
    /// 1-based index of `current`
    #[serde(default)]
    pub position: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub answered: usize,
    #[serde(default)]
    pub skipped: usize,
    #[serde(default)]
    pub correct: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

impl QuizState {
    pub fn new(mode: QuizMode, queue: VecDeque<QuizItem>, now: DateTime<Utc>) -> Self {
        Self {
            status: QuizStatus::Active,
            mode,
            total: queue.len(),
            queue,
            started_at: Some(now),
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == QuizStatus::Active
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            mode: self.mode,
            answered: self.answered,
            skipped: self.skipped,
            correct: self.correct,
            total: self.total,
        }
    }
}

/// The question currently being asked
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub mode: QuizMode,
    pub position: usize,
    pub total: usize,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Counts reported when a session finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub mode: QuizMode,
    pub answered: usize,
    pub skipped: usize,
    pub correct: usize,
    pub total: usize,
}

/// What follows an answered or skipped question
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuizNext {
    Question(QuestionView),
    Complete(QuizSummary),
}

/// Result of a quiz command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum QuizResponse {
    /// Due quiz requested but nothing is due
    NoCardsDue,
    /// The store has no cards to practice
    NoCards,
    /// Answer or skip without an active session
    NoQuizInProgress,
    /// A session started
    Started { question: QuestionView },
    /// The current question was answered
    Answered {
        #[serde(rename = "yourAnswer")]
        given: String,
        answer: String,
        correct: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        next_review: Option<DateTime<Utc>>,
        next: QuizNext,
    },
    /// The current question was skipped
    Skipped { answer: String, next: QuizNext },
}

impl QuizResponse {
    /// Final counts, if this response ended the session
    pub fn summary(&self) -> Option<&QuizSummary> {
        match self {
            Self::Answered { next: QuizNext::Complete(s), .. }
            | Self::Skipped { next: QuizNext::Complete(s), .. } => Some(s),
            _ => None,
        }
    }

    /// The question now awaiting an answer, if any
    pub fn question(&self) -> Option<&QuestionView> {
        match self {
            Self::Started { question }
            | Self::Answered { next: QuizNext::Question(question), .. }
            | Self::Skipped { next: QuizNext::Question(question), .. } => Some(question),
            _ => None,
        }
    }
}

const RULE: &str = "─────────────────────────────────────────";

impl fmt::Display for QuestionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.mode {
            QuizMode::Due => "QUIZ",
            QuizMode::Practice => "PRACTICE QUIZ",
        };
        writeln!(f, "{}", RULE)?;
        writeln!(f, "{} (card {}/{})", label, self.position, self.total)?;
        writeln!(f)?;
        writeln!(f, "   Q: {}", self.question)?;
        if let Some(topic) = &self.topic {
            writeln!(f, "   Topic: {}", topic)?;
        }
        if let Some(source) = &self.source {
            writeln!(f, "   Source: {}", source)?;
        }
        writeln!(f)?;
        writeln!(f, "   [Answer the question or skip it]")?;
        write!(f, "{}", RULE)
    }
}

impl fmt::Display for QuizSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "QUIZ COMPLETE")?;
        writeln!(f)?;
        writeln!(f, "   Answered: {}", self.answered)?;
        writeln!(f, "   Skipped: {}", self.skipped)?;
        writeln!(f, "   Correct: {}/{}", self.correct, self.total)?;
        write!(f, "{}", RULE)
    }
}

impl fmt::Display for QuizNext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Question(q) => write!(f, "{}", q),
            Self::Complete(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for QuizResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCardsDue => write!(
                f,
                "No cards due for review. Use practice mode to review anyway."
            ),
            Self::NoCards => write!(f, "No cards yet. Add cards before starting a quiz."),
            Self::NoQuizInProgress => write!(f, "No quiz in progress. Start one first."),
            Self::Started { question } => write!(f, "{}", question),
            Self::Answered {
                given,
                answer,
                correct,
                next_review,
                next,
            } => {
                writeln!(f, "   Your answer: {}", given)?;
                writeln!(f, "   CORRECT ANSWER: {}", answer)?;
                if *correct {
                    writeln!(f, "   Match!")?;
                }
                if let Some(due) = next_review {
                    writeln!(f, "   Next review: {}", due.format("%Y-%m-%d"))?;
                }
                writeln!(f)?;
                write!(f, "{}", next)
            }
            Self::Skipped { answer, next } => {
                writeln!(f, "   Skipped. Answer was: {}", answer)?;
                writeln!(f)?;
                write!(f, "{}", next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(mode: QuizMode) -> QuestionView {
        QuestionView {
            mode,
            position: 1,
            total: 2,
            question: "What is SM-2?".to_string(),
            topic: Some("concept".to_string()),
            source: None,
        }
    }

    #[test]
    fn test_missing_fields_default_to_idle() {
        let state: QuizState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.status, QuizStatus::Idle);
        assert_eq!(state.mode, QuizMode::Due);
        assert!(state.queue.is_empty());
        assert!(!state.is_active());
    }

    #[test]
    fn test_new_state_is_active() {
        let queue: VecDeque<QuizItem> = vec![
            QuizItem::Card { id: Uuid::new_v4() },
            QuizItem::Card { id: Uuid::new_v4() },
        ]
        .into();
        let state = QuizState::new(QuizMode::Practice, queue, Utc::now());

        assert!(state.is_active());
        assert_eq!(state.total, 2);
        assert_eq!(state.position, 0);
    }

    #[test]
    fn test_practice_question_is_labelled() {
        let text = QuizResponse::Started { question: view(QuizMode::Practice) }.to_string();
        assert!(text.contains("PRACTICE"));
        assert!(text.contains("Q: What is SM-2?"));
        assert!(text.contains("card 1/2"));

        let due = QuizResponse::Started { question: view(QuizMode::Due) }.to_string();
        assert!(!due.contains("PRACTICE"));
    }

    #[test]
    fn test_answer_with_completion_text() {
        let response = QuizResponse::Answered {
            given: "a scheduler".to_string(),
            answer: "A scheduler".to_string(),
            correct: true,
            next_review: None,
            next: QuizNext::Complete(QuizSummary {
                mode: QuizMode::Due,
                answered: 1,
                skipped: 1,
                correct: 1,
                total: 2,
            }),
        };
        let text = response.to_string();

        assert!(text.contains("CORRECT ANSWER: A scheduler"));
        assert!(text.contains("QUIZ COMPLETE"));
        assert!(text.contains("Correct: 1/2"));
        assert_eq!(response.summary().map(|s| s.answered), Some(1));
        assert!(response.question().is_none());
    }

    #[test]
    fn test_status_messages() {
        assert!(QuizResponse::NoCardsDue.to_string().contains("No cards due"));
        assert!(QuizResponse::NoCards.to_string().contains("Add cards"));
        assert!(QuizResponse::NoQuizInProgress
            .to_string()
            .contains("No quiz in progress"));
    }
}
