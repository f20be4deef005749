use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use syllabo::assistant::AssistantBuilder;
use syllabo::gemini::GeminiClientBuilder;
use syllabo::session::Session;
use syllabo::utils;

/// syllabo - lesson-plan Q&A assistant for the terminal
#[derive(Parser)]
#[command(name = "syllabo")]
#[command(about = "Ask questions about a lesson-plan PDF, answered by an LLM")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Ask a single question and print the answer
    Ask(AskCommand),
    /// Launch the interactive assistant
    Tui(TuiCommand),
}

/// Ask a single question
#[derive(Parser)]
struct AskCommand {
    /// The question to ask about the lesson plan
    #[arg(value_name = "QUESTION")]
    question: String,

    /// Path to the lesson-plan PDF (defaults to SYLLABO_DOCUMENT)
    #[arg(short, long, value_name = "PATH")]
    document: Option<PathBuf>,
}

/// Launch the interactive assistant
#[derive(Parser)]
struct TuiCommand {
    /// Path to the lesson-plan PDF (defaults to SYLLABO_DOCUMENT)
    #[arg(short, long, value_name = "PATH")]
    document: Option<PathBuf>,
}

fn main() {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Ask(cmd) => handle_ask(cmd),
        Commands::Tui(cmd) => handle_tui(cmd),
    };

    if let Err(e) = result {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors include validation failures like an empty question.
/// Internal errors include configuration, extraction, and service
/// failures.
fn is_user_error(error: &anyhow::Error) -> bool {
    error.to_string().contains("cannot be empty")
}

/// Handles the ask command: one question, one answer, printed to stdout.
fn handle_ask(cmd: &AskCommand) -> Result<()> {
    // Validate before touching configuration or the network
    if cmd.question.trim().is_empty() {
        anyhow::bail!("Question cannot be empty");
    }

    let client = GeminiClientBuilder::new()
        .build()
        .context("Failed to configure the answer service")?;
    let model = client.model().to_string();
    let assistant = AssistantBuilder::new()
        .client(Arc::new(client))
        .model(model)
        .build();

    let document_path = utils::resolve_document_path(cmd.document.clone());
    let mut session = Session::new(document_path);
    let document_text = session
        .document_text()
        .context("Failed to load the lesson plan")?
        .to_string();

    let answer = assistant
        .answer(&document_text, cmd.question.trim())
        .context("Failed to get an answer")?;

    println!("{answer}");

    Ok(())
}

/// Handles the tui command by launching the interactive shell.
fn handle_tui(cmd: &TuiCommand) -> Result<()> {
    let document_path = utils::resolve_document_path(cmd.document.clone());
    syllabo::tui::run(document_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_question_is_rejected_as_user_error() {
        let cmd = AskCommand {
            question: String::new(),
            document: None,
        };

        let result = handle_ask(&cmd);
        let err = result.expect_err("empty question should be rejected");
        assert!(err.to_string().contains("cannot be empty"));
        assert!(is_user_error(&err));
    }

    #[test]
    fn whitespace_only_question_is_rejected_as_user_error() {
        let cmd = AskCommand {
            question: "   \n\t  ".to_string(),
            document: None,
        };

        let result = handle_ask(&cmd);
        let err = result.expect_err("whitespace question should be rejected");
        assert!(err.to_string().contains("cannot be empty"));
        assert!(is_user_error(&err));
    }

    #[test]
    fn service_configuration_failures_are_internal_errors() {
        let err = anyhow::anyhow!("Missing API key: set the GEMINI_API_KEY environment variable");
        assert!(!is_user_error(&err));
    }
}
