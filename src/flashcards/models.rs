//! Data models for the flashcard system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::algorithm::DEFAULT_EASE_FACTOR;

/// Topic assigned when a card is added without one
pub const DEFAULT_TOPIC: &str = "general";

/// A flashcard with its spaced repetition state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Where the card came from (usually a file path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_review: Option<DateTime<Utc>>,
    /// Consecutive passing reviews since the last lapse
    #[serde(default)]
    pub repetitions: u32,
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f32,
    /// Current interval in days
    #[serde(default)]
    pub interval_days: u32,
    /// When the card is due for review
    pub next_review: DateTime<Utc>,
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

fn default_ease_factor() -> f32 {
    DEFAULT_EASE_FACTOR
}

impl Card {
    pub fn new(question: String, answer: String, topic: Option<String>, now: DateTime<Utc>) -> Self {
        let topic = topic
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(default_topic);

        Self {
            id: Uuid::new_v4(),
            question,
            answer,
            topic,
            source: None,
            created_at: now,
            last_review: None,
            repetitions: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 0,
            next_review: now,
        }
    }

    /// Check if the card is due for review
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}

/// A record of a single review attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: Uuid,
    pub card_id: Uuid,
    /// Quality rating (0-5, SM-2 scale)
    /// 0 = complete blackout
    /// 1 = incorrect, but recognized
    /// 2 = incorrect, but easy to recall
    /// 3 = correct with difficulty
    /// 4 = correct with hesitation
    /// 5 = perfect response
    pub quality: u8,
    /// Interval after the review (days)
    pub interval: u32,
    /// Ease factor after the review
    pub ease_factor: f32,
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewRecord {
    pub fn new(card: &Card, quality: u8, reviewed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            card_id: card.id,
            quality,
            interval: card.interval_days,
            ease_factor: card.ease_factor,
            reviewed_at,
        }
    }
}

/// Persisted contents of the card file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDeck {
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub review_log: Vec<ReviewRecord>,
}

impl CardDeck {
    pub fn find(&self, id: Uuid) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}

/// Aggregate statistics over the whole store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_cards: usize,
    pub due_today: usize,
    pub streak_days: u32,
    pub mastered: usize,
    pub learning: usize,
    pub total_reviews: usize,
}

/// A synthetic prompt that is shown like a card but never stored or scheduled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPrompt {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Something that can be presented as a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StudyItem {
    /// A real card from the store
    Card(Card),
    /// An ad hoc prompt
    Generated(GeneratedPrompt),
}

impl StudyItem {
    pub fn question(&self) -> &str {
        match self {
            Self::Card(card) => &card.question,
            Self::Generated(prompt) => &prompt.question,
        }
    }

    pub fn answer(&self) -> &str {
        match self {
            Self::Card(card) => &card.answer,
            Self::Generated(prompt) => &prompt.answer,
        }
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Card(card) => card.source.as_deref(),
            Self::Generated(prompt) => prompt.source.as_deref(),
        }
    }

    /// The stored card, if this item can be scheduled
    pub fn as_card(&self) -> Option<&Card> {
        match self {
            Self::Card(card) => Some(card),
            Self::Generated(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_defaults() {
        let now = Utc::now();
        let card = Card::new("Q?".to_string(), "A".to_string(), None, now);

        assert_eq!(card.topic, DEFAULT_TOPIC);
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.interval_days, 0);
        assert_eq!(card.ease_factor, DEFAULT_EASE_FACTOR);
        assert_eq!(card.next_review, now);
        assert!(card.last_review.is_none());
        assert!(card.is_due(now));
    }

    #[test]
    fn test_blank_topic_falls_back_to_default() {
        let card = Card::new("Q?".to_string(), "A".to_string(), Some("  ".to_string()), Utc::now());
        assert_eq!(card.topic, DEFAULT_TOPIC);
    }

    #[test]
    fn test_card_without_scheduling_fields_deserializes() {
        let json = r#"{
            "id": "6f1c2b8e-8a43-4d3a-9c77-1d2f0b3a4e5f",
            "question": "Q?",
            "answer": "A",
            "createdAt": "2026-01-01T00:00:00Z",
            "nextReview": "2026-01-01T00:00:00Z"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.topic, DEFAULT_TOPIC);
        assert_eq!(card.ease_factor, DEFAULT_EASE_FACTOR);
        assert_eq!(card.repetitions, 0);
    }

    #[test]
    fn test_generated_item_is_not_a_card() {
        let item = StudyItem::Generated(GeneratedPrompt {
            question: "What changed?".to_string(),
            answer: "The parser".to_string(),
            source: Some("src/parser.rs".to_string()),
        });
        assert!(item.as_card().is_none());
        assert_eq!(item.source(), Some("src/parser.rs"));

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "generated");
    }
}
