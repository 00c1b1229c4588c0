use anyhow::{Context, Result};

use recall_lib::flashcards::algorithm::format_interval;

use crate::app::App;
use crate::render::terminal::{format_date, paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, id: &str, quality: u8, format: &OutputFormat, use_color: bool) -> Result<()> {
    let card = app.find_card(id)?;
    let updated = app
        .engine
        .review_card(card.id, quality)
        .context("Failed to record review")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        OutputFormat::Plain => {
            println!("Reviewed \"{}\" with quality {}", updated.question, quality);
            println!(
                "  Next review: {} (in {})",
                paint(&format_date(updated.next_review), Color::CYAN, use_color),
                format_interval(updated.interval_days)
            );
            println!("  Repetitions: {}", updated.repetitions);
            println!("  Ease: {:.2}", updated.ease_factor);
        }
    }

    Ok(())
}
