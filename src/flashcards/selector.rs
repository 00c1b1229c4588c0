//! Card selection policies: due queue, random pick and practice pool

use std::path::Path;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use super::models::Card;

/// All due cards, soonest due first (ties keep insertion order)
pub fn due_cards(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    let mut due: Vec<Card> = cards.iter().filter(|c| c.is_due(now)).cloned().collect();
    // sort_by_key is stable
    due.sort_by_key(|c| c.next_review);
    due
}

/// Pick a card at random, preferring cards related to `from_files`.
///
/// When a filter is given and some cards match it, the pick is made among
/// those; otherwise any card in the store may be returned. `None` only when
/// there are no cards at all.
pub fn random_card<R: Rng + ?Sized>(
    cards: &[Card],
    from_files: Option<&[String]>,
    rng: &mut R,
) -> Option<Card> {
    if let Some(files) = from_files.filter(|f| !f.is_empty()) {
        let related: Vec<&Card> = cards.iter().filter(|c| matches_files(c, files)).collect();
        if let Some(card) = related.choose(rng) {
            return Some((*card).clone());
        }
        log::debug!("No cards related to {} file(s), picking from all cards", files.len());
    }

    cards.choose(rng).cloned()
}

/// Cards for a practice session: due cards first, topped up with the rest
pub fn practice_pool<R: Rng + ?Sized>(
    cards: &[Card],
    now: DateTime<Utc>,
    limit: usize,
    rng: &mut R,
) -> Vec<Card> {
    let (mut due, mut rest): (Vec<Card>, Vec<Card>) =
        cards.iter().cloned().partition(|c| c.is_due(now));
    due.shuffle(rng);
    rest.shuffle(rng);

    due.into_iter().chain(rest).take(limit).collect()
}

/// Whether a card's source or topic refers to one of the given paths
pub fn matches_files(card: &Card, files: &[String]) -> bool {
    files.iter().any(|file| {
        let file = normalize_path(file);
        if file.is_empty() {
            return false;
        }

        let source_match = card
            .source
            .as_deref()
            .map(normalize_path)
            .is_some_and(|source| same_path(&source, &file));

        let topic_match = card.topic.eq_ignore_ascii_case(&file)
            || Path::new(&file)
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|stem| card.topic.eq_ignore_ascii_case(stem));

        source_match || topic_match
    })
}

fn normalize_path(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    path.trim_start_matches("./").trim_end_matches('/').to_string()
}

/// Equal, or one is a trailing path suffix of the other
fn same_path(a: &str, b: &str) -> bool {
    a == b || a.ends_with(&format!("/{}", b)) || b.ends_with(&format!("/{}", a))
}
