use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use recall_lib::{Card, ReviewEngine, StorePaths};

/// Shared application state for CLI commands
pub struct App {
    pub engine: ReviewEngine,
}

impl App {
    /// Initialize from the given or default data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => StorePaths::default_data_dir().context("Failed to get data directory")?,
        };

        let engine = ReviewEngine::open(data_dir.clone())
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;

        Ok(Self { engine })
    }

    /// Find a card by ID (full or unique prefix)
    pub fn find_card(&self, id: &str) -> Result<Card> {
        let cards = self.engine.load_cards().context("Failed to load cards")?;
        let id_lower = id.trim().to_lowercase();
        if id_lower.is_empty() {
            bail!("Card ID must not be empty");
        }

        // Exact match first
        if let Some(card) = cards.iter().find(|c| c.id.to_string() == id_lower) {
            return Ok(card.clone());
        }

        // Prefix match
        let matches: Vec<&Card> = cards
            .iter()
            .filter(|c| c.id.to_string().starts_with(&id_lower))
            .collect();

        match matches.len() {
            0 => bail!("No card matching '{}'", id),
            1 => Ok(matches[0].clone()),
            _ => bail!("Ambiguous card ID '{}'. Matches:\n{}", id,
                matches.iter().map(|c| format!("  - {} {}", c.id, c.question)).collect::<Vec<_>>().join("\n")),
        }
    }
}
