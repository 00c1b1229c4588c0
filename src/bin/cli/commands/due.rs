use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::card_line;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let due = app.engine.due_cards().context("Failed to load due cards")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("No cards due today.");
                return Ok(());
            }

            let now = Utc::now();
            for card in &due {
                println!("{}", card_line(card, now, use_color));
            }
            println!("\n{} card(s) due", due.len());
        }
    }

    Ok(())
}
