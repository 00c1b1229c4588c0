use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::card_line;
use crate::OutputFormat;

pub fn run(app: &App, topic: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let mut cards = app.engine.load_cards().context("Failed to load cards")?;
    if let Some(topic) = topic {
        cards.retain(|c| c.topic.eq_ignore_ascii_case(topic));
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards found.");
                return Ok(());
            }

            let now = Utc::now();
            for card in &cards {
                println!("{}", card_line(card, now, use_color));
            }
            println!("\n{} cards total", cards.len());
        }
    }

    Ok(())
}
