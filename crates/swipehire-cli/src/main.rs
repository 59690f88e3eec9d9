//! swipehire - terminal chat with the SwipeHire hiring assistant

mod charts;
mod config;
mod ui;

use anyhow::{Context, bail};
use clap::Parser;
use futures::StreamExt;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use swipehire_assistant::{AssistantClient, CompanyData, Conversation, TurnEvent};

use crate::config::Config;
use crate::ui::StreamPrinter;

/// Starter questions shown when the conversation is empty
const SUGGESTED_QUESTIONS: &[&str] = &[
    "What roles should I prioritize hiring for a tech startup?",
    "Analyze gaps for a 20-person engineering team",
    "What skills are trending in the fintech industry?",
];

/// swipehire - AI-powered talent insights in your terminal
#[derive(Parser, Debug)]
#[command(name = "swipehire")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ask a single question and exit
    #[arg(short = 'c', long)]
    question: Option<String>,

    /// Assistant gateway URL (overrides config and environment)
    #[arg(long)]
    url: Option<String>,

    /// Bearer token for the gateway
    #[arg(long)]
    api_key: Option<String>,

    /// Company industry sent as context
    #[arg(long)]
    industry: Option<String>,

    /// Company size sent as context
    #[arg(long)]
    size: Option<String>,

    /// Current team functions, repeatable (e.g. --team Frontend --team Backend)
    #[arg(long = "team")]
    team: Vec<String>,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if args.init_config {
        let config = Config::default();
        config.save().context("failed to write config file")?;
        println!("Wrote {}", Config::config_path().display());
        return Ok(());
    }

    let config = Config::load();

    let url = args
        .url
        .clone()
        .or_else(|| std::env::var("SWIPEHIRE_ASSISTANT_URL").ok())
        .or(config.url.clone());
    let Some(url) = url else {
        bail!(
            "no gateway URL configured; pass --url, set SWIPEHIRE_ASSISTANT_URL, or add `url` to {}",
            Config::config_path().display()
        );
    };

    let mut client = AssistantClient::new(url);
    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("SWIPEHIRE_API_KEY").ok())
        .or(config.api_key.clone());
    if let Some(key) = api_key {
        client = client.with_api_key(key);
    }

    let company = build_company(&args, &config);
    let mut conversation = Conversation::new();

    if let Some(question) = args.question {
        run_turn(&client, &mut conversation, &company, &question).await;
        return Ok(());
    }

    println!("SwipeHire Hiring Assistant — I'll analyze your team and recommend who to hire next.");
    println!("Try one of:");
    for q in SUGGESTED_QUESTIONS {
        println!("  • {}", q);
    }
    println!("(type 'exit' to quit)\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question == "exit" || question == "quit" {
            break;
        }
        run_turn(&client, &mut conversation, &company, question).await;
        println!();
    }

    Ok(())
}

fn build_company(args: &Args, config: &Config) -> CompanyData {
    let mut company = config
        .company
        .as_ref()
        .map(|p| p.to_company_data())
        .unwrap_or_default();
    if let Some(ref industry) = args.industry {
        company.industry = industry.clone();
    }
    if let Some(ref size) = args.size {
        company.size = size.clone();
    }
    if !args.team.is_empty() {
        company.current_team = args.team.clone();
    }
    company
}

/// Run one question/answer turn, streaming output to the terminal.
///
/// Fatal errors are printed and the partial turn is dropped from history so
/// the question can be retried.
async fn run_turn(
    client: &AssistantClient,
    conversation: &mut Conversation,
    company: &CompanyData,
    question: &str,
) {
    conversation.push_user(question);

    let mut stream = match client.ask(conversation.messages(), company).await {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("error: {}", e);
            conversation.abort_turn();
            return;
        }
    };

    let mut printer = StreamPrinter::new();
    // charts arrive just before Done; render them only after the text block
    // is final so the last redraw cannot erase them
    let mut extracted = Vec::new();
    while let Some(event) = stream.next().await {
        match event {
            TurnEvent::TextUpdate { text } => {
                conversation.apply_update(&text);
                if let Err(e) = printer.redraw(&text) {
                    tracing::warn!(error = %e, "failed to write to terminal");
                }
            }
            TurnEvent::Charts { charts } => {
                extracted = charts;
            }
            TurnEvent::Done { text } => {
                conversation.finish_turn(&text);
                if let Err(e) = printer.finish(&text) {
                    tracing::warn!(error = %e, "failed to write to terminal");
                }
                charts::render_charts(&extracted);
            }
            TurnEvent::Error { message } => {
                eprintln!("error: {}", message);
                conversation.abort_turn();
                return;
            }
        }
    }
}
