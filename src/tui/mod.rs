//! Terminal User Interface module for syllabo.
//!
//! Provides the interactive assistant surface: question input, answer
//! panel, rating control, and free-text feedback box, using ratatui for
//! rendering and crossterm for terminal management.

use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{self as crossterm_event, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

mod app;
pub mod event;
mod ui;

pub use app::{App, Focus, StatusKind, StatusMessage};

use crate::assistant::{Assistant, AssistantBuilder};
use crate::feedback::{FeedbackStore, OpenRecord, RatingRecord};
use crate::gemini::GeminiClientBuilder;
use crate::session::Session;
use crate::utils;
use event::Action;

/// Everything the event loop needs to execute user actions.
///
/// Bundled so action execution can be tested with mock clients and
/// tempfile-backed stores.
struct Services {
    assistant: Assistant,
    session: Session,
    rating_store: FeedbackStore<RatingRecord>,
    open_store: FeedbackStore<OpenRecord>,
}

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen.
///
/// # Errors
///
/// Returns an error if terminal initialization fails.
fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen. This should always
/// be called before exiting the TUI, even in error cases, to prevent
/// terminal corruption.
///
/// # Errors
///
/// Returns an error if terminal restoration fails.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Minimal terminal restoration for the panic handler.
///
/// Does not require a Terminal reference, making it safe to call from a
/// panic hook. Ignores errors since we're likely already in a bad state.
fn restore_terminal_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Installs a panic hook that restores the terminal before panicking.
///
/// The original panic hook is preserved and called after restoration.
fn init_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_panic();
        original_hook(panic_info);
    }));
}

/// Executes one user action against the services.
///
/// Returns `true` if the application should quit. Every fallible branch
/// converts its failure into a status message; nothing here propagates an
/// error out of the event loop.
fn execute_action(app: &mut App, services: &mut Services, action: Action) -> bool {
    match action {
        Action::None => false,
        Action::Quit => true,
        Action::Ask => {
            app.clear_status();
            if let Some(question) = app.take_ask_request() {
                ask(app, services, &question);
            }
            false
        }
        Action::SubmitRating => {
            app.clear_status();
            submit_rating(app, services);
            false
        }
        Action::SubmitFeedback => {
            app.clear_status();
            if let Some(comment) = app.take_open_feedback_request() {
                match services.open_store.append(OpenRecord::new(comment)) {
                    Ok(()) => app.set_info("Thanks for helping us grow!"),
                    Err(err) => app.set_error(err.to_string()),
                }
            }
            false
        }
    }
}

/// Answers a validated question and records it in the session.
///
/// The call blocks until the answer service responds; the interface
/// accepts no input in the meantime.
fn ask(app: &mut App, services: &mut Services, question: &str) {
    let document_text = match services.session.document_text() {
        Ok(text) => text.to_string(),
        Err(err) => {
            app.set_error(err.to_string());
            return;
        }
    };

    match services.assistant.answer(&document_text, question) {
        Ok(answer) => {
            app.set_answer(answer);
            services.session.set_last_question(question);
            app.set_info("Rate the answer below, or ask another question.");
        }
        Err(err) => app.set_error(err.to_string()),
    }
}

/// Persists the selected rating together with the question it rates.
fn submit_rating(app: &mut App, services: &mut Services) {
    let Some(rating) = app.rating_choice() else {
        app.set_warning("Choose yes or no before submitting.");
        return;
    };
    let Some(question) = services.session.last_question().map(str::to_string) else {
        app.set_warning("Ask a question before rating the answer.");
        return;
    };

    match services
        .rating_store
        .append(RatingRecord::new(rating, question))
    {
        Ok(()) => {
            services.session.set_last_rating(rating);
            app.set_info("Thanks for the feedback!");
        }
        Err(err) => app.set_error(err.to_string()),
    }
}

/// Runs the main event loop for the TUI.
///
/// Polls for keyboard events, updates app state, executes actions, and
/// re-renders. Terminal state is always restored, even on error.
///
/// # Errors
///
/// Returns an error if event polling, rendering, or terminal operations
/// fail.
fn run_event_loop(app: &mut App, services: &mut Services) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_event_loop_internal(app, services, &mut terminal);

    // Always restore terminal state
    if let Err(e) = restore_terminal(&mut terminal) {
        eprintln!("Error restoring terminal: {e}");
    }

    result
}

/// Internal event loop implementation.
///
/// Separated from `run_event_loop` to ensure terminal restoration happens
/// in the outer function.
fn run_event_loop_internal(
    app: &mut App,
    services: &mut Services,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::draw(frame, app);
        })?;

        if crossterm_event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = crossterm_event::read()?
        {
            let action = event::handle_key_event(app, key);
            if execute_action(app, services, action) {
                break;
            }
        }
    }

    Ok(())
}

/// Entry point for the TUI application.
///
/// Builds the answer-service client (a missing credential fails here,
/// before the terminal is touched), wires the feedback stores, loads the
/// document into the session, and starts the event loop. A document
/// extraction failure becomes a banner rather than an abort, so feedback
/// collection keeps working.
///
/// # Errors
///
/// Returns an error if:
/// - The answer-service credential is missing (fatal by design)
/// - The feedback directory cannot be determined or created
/// - Terminal initialization or the event loop fails
pub fn run(document_path: PathBuf) -> Result<()> {
    init_panic_hook();

    let client = GeminiClientBuilder::new()
        .build()
        .context("Failed to configure the answer service")?;
    let model = client.model().to_string();
    let assistant = AssistantBuilder::new()
        .client(Arc::new(client))
        .model(model)
        .build();

    let rating_path = utils::rating_feedback_path().context("Failed to locate feedback files")?;
    utils::ensure_parent_directory(&rating_path)?;
    let open_path = utils::open_feedback_path().context("Failed to locate feedback files")?;
    utils::ensure_parent_directory(&open_path)?;

    let mut services = Services {
        assistant,
        session: Session::new(document_path),
        rating_store: FeedbackStore::new(rating_path),
        open_store: FeedbackStore::new(open_path),
    };

    let mut app = App::new();
    if let Err(err) = services.session.document_text() {
        app.set_banner(err.to_string());
    }

    run_event_loop(&mut app, &mut services).context("TUI event loop failed")?;

    // Per-session state ends with the session.
    services.session.clear();

    Ok(())
}
