use anyhow::Result;

use recall_lib::storage::StorageError;
use recall_lib::{Card, StudyItem};

use crate::app::App;
use crate::cache::QuizCache;
use crate::render::terminal::{format_date, paint, Color, RULE};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let Some(cache) = QuizCache::load(&app.engine.paths().quiz_cache_file) else {
        match format {
            OutputFormat::Json => println!("null"),
            OutputFormat::Plain => println!("No quiz card available."),
        }
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            let updated = record_review(app, &cache.item)?;
            let output = serde_json::json!({
                "question": cache.item.question(),
                "answer": cache.item.answer(),
                "source": cache.item.source(),
                "nextReview": updated.as_ref().map(|c| c.next_review),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", RULE);
            println!("{}", paint("ANSWER", Color::BOLD, use_color));
            println!();
            println!("   A: {}", paint(cache.item.answer(), Color::GREEN, use_color));
            println!();
            if let Some(source) = cache.item.source() {
                println!("   Source: {}", source);
            }
            println!("{}", RULE);

            if let Some(card) = record_review(app, &cache.item)? {
                println!("\n   Recorded as reviewed (next: {})\n", format_date(card.next_review));
            }
        }
    }

    Ok(())
}

/// Schedule the revealed card; generated prompts and deleted cards are not
fn record_review(app: &App, item: &StudyItem) -> Result<Option<Card>> {
    let Some(card) = item.as_card() else {
        return Ok(None);
    };

    match app.engine.review_engaged(card.id) {
        Ok(updated) => Ok(Some(updated)),
        Err(StorageError::CardNotFound(id)) => {
            log::warn!("Card {} was deleted after it was picked, not scheduling it", id);
            Ok(None)
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to record review")),
    }
}
