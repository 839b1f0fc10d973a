//! Lexicard: turn words and expressions into Anki flashcards.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::{Input, Select};
use reqwest::Client;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lexicard_core::{
    contains_expression, normalize_sentence, ExpressionMatcher, MeaningMode, WordData,
};

mod card;
mod export;
mod sources;

#[derive(Parser)]
#[command(name = "lexicard")]
#[command(about = "Turn words and expressions into Anki flashcards", long_about = None)]
#[command(version)]
struct Cli {
    /// Expressions to look up; prompts interactively when omitted
    expressions: Vec<String>,

    /// Meaning resolution mode: normal (first sense) or precise (scored)
    #[arg(long, default_value = "normal")]
    mode: MeaningMode,

    /// Output path for the Anki import file
    #[arg(long)]
    out: Option<PathBuf>,

    /// Accept every card without interactive review
    #[arg(long)]
    yes: bool,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let client = Client::new();
    let mut cards = Vec::new();

    if cli.expressions.is_empty() {
        loop {
            let raw: String = Input::new()
                .with_prompt("Expression (empty to finish)")
                .allow_empty(true)
                .interact_text()?;
            let expression = normalize_sentence(&raw).to_lowercase();
            if expression.is_empty() {
                break;
            }
            handle_expression(&client, &expression, &cli, &mut cards).await?;
        }
    } else {
        for raw in &cli.expressions {
            let expression = normalize_sentence(raw).to_lowercase();
            if expression.is_empty() {
                continue;
            }
            handle_expression(&client, &expression, &cli, &mut cards).await?;
        }
    }

    if cards.is_empty() {
        println!("{}", style("No cards created.").yellow());
        return Ok(());
    }

    let path = cli
        .out
        .unwrap_or_else(|| PathBuf::from(export::default_file_name()));
    std::fs::write(&path, export::build_import_file(&cards))?;
    println!(
        "{} {} card(s) written to {}",
        style("✔").green(),
        cards.len(),
        path.display()
    );
    Ok(())
}

async fn handle_expression(
    client: &Client,
    expression: &str,
    cli: &Cli,
    cards: &mut Vec<export::ExportCard>,
) -> Result<()> {
    println!("{}", style(format!("Looking up \"{expression}\"...")).dim());

    match lookup(client, expression, cli.mode).await {
        Ok(data) => {
            if let Some(card) = review_card(expression, &data, cli.yes)? {
                cards.push(card);
                println!(
                    "{} Card saved. Total: {}",
                    style("✔").green(),
                    cards.len()
                );
            }
        }
        Err(err) => println!("{} {err}", style("✘").red()),
    }
    Ok(())
}

/// Fetch all sources concurrently and hand the raw results to the engine.
/// Each failed source contributes an empty payload or sentence list.
async fn lookup(
    client: &Client,
    expression: &str,
    mode: MeaningMode,
) -> lexicard_core::Result<WordData> {
    let (dictionary, tatoeba, quotable) = tokio::join!(
        sources::fetch_dictionary(client, expression),
        sources::fetch_tatoeba(client, expression),
        sources::fetch_quotable(client, expression),
    );

    let payloads: Vec<Value> = dictionary.into_iter().collect();
    let context_sources = vec![tatoeba, quotable];
    lexicard_core::resolve(expression, &payloads, &context_sources, mode)
}

fn print_preview(matcher: &ExpressionMatcher, expression: &str, data: &WordData, sentence: &str) {
    let highlighted =
        matcher.highlight_with(sentence, |matched| style(matched).green().bold().to_string());

    println!();
    println!("{}", style(format!("── {expression} ──")).cyan().bold());
    println!("  Sentence:   {highlighted}");
    println!("  Meaning:    {}", data.definition);
    println!("  Phonetic:   {}", data.phonetic);
    println!("  Confidence: {:?}", data.meaning_confidence);
    if data.meaning_candidates.len() > 1 {
        println!("  Alternates:");
        for alternate in data.meaning_candidates.iter().skip(1) {
            println!("    - {alternate}");
        }
    }
}

fn review_card(
    expression: &str,
    data: &WordData,
    auto_accept: bool,
) -> Result<Option<export::ExportCard>> {
    let matcher = ExpressionMatcher::new(expression);
    let mut sentence = data.sentence.clone();
    let mut candidate_index = data
        .sentence_candidates
        .iter()
        .position(|item| item == &sentence)
        .unwrap_or(0);

    loop {
        print_preview(&matcher, expression, data, &sentence);
        if auto_accept {
            return Ok(Some(card::build(expression, &sentence, data)));
        }

        let actions = ["Save card", "Swap sentence", "Type a new sentence", "Skip"];
        let choice = Select::new()
            .with_prompt("Action")
            .items(&actions)
            .default(0)
            .interact()?;

        match choice {
            0 => return Ok(Some(card::build(expression, &sentence, data))),
            1 => {
                if data.sentence_candidates.len() <= 1 {
                    println!("{}", style("No other sentence suggestions.").yellow());
                } else {
                    candidate_index = (candidate_index + 1) % data.sentence_candidates.len();
                    sentence = data.sentence_candidates[candidate_index].clone();
                }
            }
            2 => {
                if let Some(custom) = prompt_replacement_sentence(expression)? {
                    sentence = custom;
                }
            }
            _ => {
                println!("{}", style("Card skipped.").dim());
                return Ok(None);
            }
        }
    }
}

/// Ask for a replacement sentence until it contains the expression or the
/// user cancels with an empty line.
fn prompt_replacement_sentence(expression: &str) -> Result<Option<String>> {
    loop {
        let raw: String = Input::new()
            .with_prompt("New sentence (empty to cancel)")
            .allow_empty(true)
            .interact_text()?;
        let sentence = normalize_sentence(&raw);
        if sentence.is_empty() {
            return Ok(None);
        }
        if !contains_expression(&sentence, expression) {
            println!(
                "{}",
                style(format!("The sentence must contain \"{expression}\".")).yellow()
            );
            continue;
        }
        return Ok(Some(sentence));
    }
}
