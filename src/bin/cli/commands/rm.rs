use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    let card = app.find_card(id)?;
    let removed = app
        .engine
        .delete_card(card.id)
        .context("Failed to delete card")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&removed)?);
        }
        OutputFormat::Plain => {
            println!("Deleted card \"{}\" ({})", removed.question, removed.id);
        }
    }

    Ok(())
}
