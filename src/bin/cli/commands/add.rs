use anyhow::{Context, Result};

use recall_lib::CardDraft;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    question: String,
    answer: String,
    topic: Option<String>,
    source: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let draft = CardDraft {
        question,
        answer,
        topic,
        source,
    };
    let card = app.engine.add_card_from(draft).context("Failed to add card")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Added card to topic \"{}\"", card.topic);
            println!("  Q: {}", card.question);
            println!("  A: {}", card.answer);
            if let Some(source) = &card.source {
                println!("  Source: {}", source);
            }
            println!("  ID: {}", paint(&card.id.to_string(), Color::DIM, use_color));
        }
    }

    Ok(())
}
