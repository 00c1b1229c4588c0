use anyhow::{Context, Result};
use chrono::Utc;

use recall_lib::flashcards::selector::matches_files;
use recall_lib::StudyItem;

use crate::app::App;
use crate::cache::{PickSource, QuizCache};
use crate::render::terminal::{paint, Color, RULE};
use crate::OutputFormat;

pub fn run(app: &App, from_files: &[String], format: &OutputFormat, use_color: bool) -> Result<()> {
    let filter = if from_files.is_empty() { None } else { Some(from_files) };
    let card = app
        .engine
        .get_random_card(filter)
        .context("Failed to pick a card")?;

    let Some(card) = card else {
        match format {
            OutputFormat::Json => println!("null"),
            OutputFormat::Plain => println!("No cards yet. Add cards with `recall add`."),
        }
        return Ok(());
    };

    let picked_by = if !from_files.is_empty() && matches_files(&card, from_files) {
        PickSource::RecentWork
    } else {
        PickSource::Random
    };

    let cache = QuizCache {
        item: StudyItem::Card(card),
        picked_by,
        timestamp: Utc::now(),
    };
    cache.save(&app.engine.paths().quiz_cache_file);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cache)?);
        }
        OutputFormat::Plain => {
            println!("{}", RULE);
            println!(
                "{}",
                paint(&format!("QUICK QUIZ ({})", picked_by.label()), Color::BOLD, use_color)
            );
            println!();
            println!("   Q: {}", cache.item.question());
            println!();
            println!("   [Run `recall reveal` to see the answer]");
            println!("{}", RULE);
        }
    }

    Ok(())
}
