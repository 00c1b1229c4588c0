use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::{paint, Color, RULE};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.engine.get_stats().context("Failed to compute stats")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("{}", RULE);
            println!("{}", paint("DAILY DIGEST", Color::BOLD, use_color));

            if stats.due_today > 0 {
                let due = format!("{} card(s) due for review", stats.due_today);
                println!("   {}", paint(&due, Color::YELLOW, use_color));
            } else {
                println!("   No cards due today");
            }

            if stats.streak_days > 0 {
                println!("   Streak: {} day(s)", stats.streak_days);
            }

            if stats.total_cards > 0 {
                println!(
                    "   Library: {} cards ({} mastered, {} learning)",
                    stats.total_cards, stats.mastered, stats.learning
                );
                println!("   Reviews: {}", stats.total_reviews);
            }

            println!("{}", RULE);
        }
    }

    Ok(())
}
