use chrono::{DateTime, Local, Utc};

use recall_lib::flashcards::algorithm::format_interval;
use recall_lib::Card;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Wrap text in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub const RULE: &str = "─────────────────────────────────────────";

/// Local date for display
pub fn format_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// One-line summary of a card for listings
pub fn card_line(card: &Card, now: DateTime<Utc>, use_color: bool) -> String {
    let id = card.id.to_string();
    let short_id = paint(&id[..8], Color::DIM, use_color);
    let due = if card.is_due(now) {
        paint("due", Color::YELLOW, use_color)
    } else {
        format!("next {}", format_date(card.next_review))
    };

    format!(
        "{} {} [{}] ({}, every {}, ease {:.2})",
        short_id,
        card.question,
        card.topic,
        due,
        format_interval(card.interval_days),
        card.ease_factor
    )
}
