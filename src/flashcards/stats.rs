//! Review statistics derived from the stored deck

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

use super::models::{CardDeck, ReviewStats};
use super::selector::due_cards;

/// Calculate statistics for the deck at `now`
pub fn calculate_stats(deck: &CardDeck, now: DateTime<Utc>, mastery_threshold: u32) -> ReviewStats {
    let mastered = deck
        .cards
        .iter()
        .filter(|c| c.repetitions >= mastery_threshold)
        .count();

    let today = now.with_timezone(&Local).date_naive();

    ReviewStats {
        total_cards: deck.cards.len(),
        due_today: due_cards(&deck.cards, now).len(),
        streak_days: current_streak(&review_days(deck), today),
        mastered,
        learning: deck.cards.len() - mastered,
        total_reviews: deck.review_log.len(),
    }
}

/// Local calendar days with at least one recorded review.
///
/// Uses the review log plus each card's last review, so a hand-edited or
/// partially migrated file still yields a sensible streak.
pub fn review_days(deck: &CardDeck) -> BTreeSet<NaiveDate> {
    deck.review_log
        .iter()
        .map(|r| r.reviewed_at)
        .chain(deck.cards.iter().filter_map(|c| c.last_review))
        .map(|t| t.with_timezone(&Local).date_naive())
        .collect()
}

/// Consecutive review days ending today, or yesterday if today has none yet
pub fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut check_date = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while days.contains(&check_date) {
        streak += 1;
        check_date = check_date - Duration::days(1);
    }
    streak
}
