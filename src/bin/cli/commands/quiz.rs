use anyhow::{Context, Result};

use recall_lib::{GeneratedPrompt, QuizResponse};

use crate::app::App;
use crate::OutputFormat;

fn print_response(response: &QuizResponse, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(response)?),
        OutputFormat::Plain => println!("{}", response),
    }
    Ok(())
}

pub fn run_start(app: &App, practice: bool, limit: Option<usize>, format: &OutputFormat) -> Result<()> {
    let response = app
        .engine
        .quiz_start(practice, limit)
        .context("Failed to start quiz")?;
    print_response(&response, format)
}

pub fn run_answer(app: &App, text: &str, format: &OutputFormat) -> Result<()> {
    let response = app
        .engine
        .quiz_answer(text)
        .context("Failed to answer quiz question")?;
    print_response(&response, format)
}

pub fn run_skip(app: &App, format: &OutputFormat) -> Result<()> {
    let response = app.engine.quiz_skip().context("Failed to skip quiz question")?;
    print_response(&response, format)
}

pub fn run_clear(app: &App, format: &OutputFormat) -> Result<()> {
    app.engine.clear_quiz_state().context("Failed to clear quiz")?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "status": "idle" })),
        OutputFormat::Plain => println!("Quiz cleared."),
    }
    Ok(())
}

pub fn run_adhoc(
    app: &App,
    question: String,
    answer: String,
    source: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let prompt = GeneratedPrompt {
        question,
        answer,
        source,
    };
    let response = app
        .engine
        .quiz_start_prompts(vec![prompt])
        .context("Failed to start quiz")?;
    print_response(&response, format)
}
