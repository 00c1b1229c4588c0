//! SM-2 Spaced Repetition Algorithm
//!
//! Implementation of the SuperMemo 2 algorithm for calculating
//! review intervals based on recall quality.
//!
//! Quality ratings (0-5):
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing answer, remembered
//! - 2: Incorrect, but answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation
//!
//! Constants:
//! - New cards start at ease 2.5 with a 0 day interval (due immediately)
//! - First pass schedules 1 day out, second pass 6 days, then interval * ease
//! - A lapse (quality < 3) resets repetitions, drops the interval to 1 day
//!   and lowers ease by 0.2
//! - Ease never goes below 1.3
//! - Intervals are capped at 100 years, and due dates saturate at the
//!   latest representable time

use chrono::{DateTime, Duration, Utc};

use super::models::Card;

/// Ease factor given to new cards
pub const DEFAULT_EASE_FACTOR: f32 = 2.5;

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f32 = 1.3;

/// Lowest quality that counts as remembered
pub const PASS_QUALITY: u8 = 3;

/// Highest quality rating
pub const MAX_QUALITY: u8 = 5;

/// Interval after a lapse (days)
pub const MIN_INTERVAL_DAYS: u32 = 1;

/// Longest interval the scheduler will assign (days)
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

const FIRST_INTERVAL_DAYS: u32 = 1;
const SECOND_INTERVAL_DAYS: u32 = 6;
const LAPSE_EASE_PENALTY: f32 = 0.2;

/// Result of calculating the next review
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResult {
    pub repetitions: u32,
    pub interval: u32,
    pub ease_factor: f32,
    pub next_review: DateTime<Utc>,
}

/// Calculate the next review interval and ease factor using SM-2 algorithm
///
/// The returned due date never moves backwards relative to the card's
/// current one, and a passing review always moves it strictly forward
/// unless it has already reached the latest representable time.
pub fn calculate_next_review(card: &Card, quality: u8, now: DateTime<Utc>) -> ReviewResult {
    let quality = quality.min(MAX_QUALITY);
    let passed = quality >= PASS_QUALITY;

    let (repetitions, interval, ease_factor) = if passed {
        // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))
        let miss = (MAX_QUALITY - quality) as f32;
        let ease_factor = (card.ease_factor + (0.1 - miss * (0.08 + miss * 0.02)))
            .max(MIN_EASE_FACTOR);

        let repetitions = card.repetitions + 1;
        let interval = match repetitions {
            1 => FIRST_INTERVAL_DAYS,
            2 => SECOND_INTERVAL_DAYS,
            _ => ((card.interval_days as f32 * ease_factor).round() as u32)
                .clamp(MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS),
        };

        (repetitions, interval, ease_factor)
    } else {
        let ease_factor = (card.ease_factor - LAPSE_EASE_PENALTY).max(MIN_EASE_FACTOR);
        (0, MIN_INTERVAL_DAYS, ease_factor)
    };

    let scheduled = add_days(now, interval);
    let next_review = if scheduled > card.next_review {
        scheduled
    } else if passed {
        add_days(card.next_review, interval)
    } else {
        card.next_review
    };

    ReviewResult {
        repetitions,
        interval,
        ease_factor,
        next_review,
    }
}

fn add_days(at: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    at.checked_add_signed(Duration::days(days as i64))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Apply a review to a card, returning the updated copy
pub fn review(card: &Card, quality: u8, now: DateTime<Utc>) -> Card {
    let ReviewResult {
        repetitions,
        interval,
        ease_factor,
        next_review,
    } = calculate_next_review(card, quality, now);

    Card {
        repetitions,
        interval_days: interval,
        ease_factor,
        next_review,
        last_review: Some(now),
        ..card.clone()
    }
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    if days == 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
