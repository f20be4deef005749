//! Keyboard event handling for the TUI.
//!
//! Maps crossterm keyboard events to state changes and actions. Key
//! behavior depends on the focused panel; actions that need services
//! (asking, persisting feedback) are returned to the event loop instead
//! of being executed here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};
use crate::feedback::Rating;

/// An operation the event loop must carry out with its services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do beyond the state change already applied
    None,
    /// Exit the application
    Quit,
    /// Answer the current question
    Ask,
    /// Persist the selected rating
    SubmitRating,
    /// Persist the free-text feedback
    SubmitFeedback,
}

/// Handles a keyboard event, updating app state and returning the action
/// the event loop should execute.
///
/// # Event Handling
///
/// - `Ctrl+C`: quit from any focus state
/// - `Tab` / `Shift+Tab`: cycle focus between panels
/// - `Esc`: return to the question input
/// - `QuestionInput` focused: character input edits the question,
///   `Enter` asks
/// - `AnswerView` focused: j/k scrolling, `q` quits
/// - `RatingSelect` focused: y/n choose, `Enter` submits, `q` quits
/// - `FeedbackInput` focused: character input edits, `Enter` submits
///
/// # Examples
///
/// ```
/// use syllabo::tui::{App, event::{Action, handle_key_event}};
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
///
/// let mut app = App::new();
/// let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
/// assert_eq!(handle_key_event(&mut app, key), Action::Quit);
/// ```
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    // Global quit - works from any focus state
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // Global focus cycling with Tab / Shift+Tab (BackTab)
    if key.code == KeyCode::Tab {
        app.next_focus();
        return Action::None;
    }
    if key.code == KeyCode::BackTab {
        app.prev_focus();
        return Action::None;
    }

    // Global Esc - return to the question input
    if key.code == KeyCode::Esc {
        app.reset_focus();
        app.clear_status();
        return Action::None;
    }

    // Focus-specific handling
    match app.focus() {
        Focus::QuestionInput => handle_question_input(app, key),
        Focus::AnswerView => handle_answer_view(app, key),
        Focus::RatingSelect => handle_rating_select(app, key),
        Focus::FeedbackInput => handle_feedback_input(app, key),
    }
}

/// Handles keyboard input when the question input is focused.
fn handle_question_input(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            app.push_question_char(c);
            Action::None
        }
        KeyCode::Backspace => {
            app.pop_question_char();
            Action::None
        }
        KeyCode::Enter => Action::Ask,
        _ => Action::None,
    }
}

/// Handles keyboard input when the answer panel is focused.
///
/// Supports Vim-style scrolling (j/k).
fn handle_answer_view(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_answer_down(1);
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_answer_up(1);
            Action::None
        }
        KeyCode::Char('q') if key.modifiers.is_empty() => Action::Quit,
        _ => Action::None,
    }
}

/// Handles keyboard input when the rating control is focused.
fn handle_rating_select(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') if key.modifiers.is_empty() => {
            app.select_rating(Rating::Yes);
            Action::None
        }
        KeyCode::Char('n') if key.modifiers.is_empty() => {
            app.select_rating(Rating::No);
            Action::None
        }
        KeyCode::Left | KeyCode::Right => {
            // Two choices: any horizontal movement toggles
            let toggled = match app.rating_choice() {
                Some(Rating::Yes) => Rating::No,
                Some(Rating::No) | None => Rating::Yes,
            };
            app.select_rating(toggled);
            Action::None
        }
        KeyCode::Enter => Action::SubmitRating,
        KeyCode::Char('q') if key.modifiers.is_empty() => Action::Quit,
        _ => Action::None,
    }
}

/// Handles keyboard input when the feedback box is focused.
fn handle_feedback_input(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            app.push_feedback_char(c);
            Action::None
        }
        KeyCode::Backspace => {
            app.pop_feedback_char();
            Action::None
        }
        KeyCode::Enter => Action::SubmitFeedback,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_quits_from_any_focus() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        let mut app = App::new();
        assert_eq!(handle_key_event(&mut app, ctrl_c), Action::Quit);

        app.next_focus();
        assert_eq!(handle_key_event(&mut app, ctrl_c), Action::Quit);

        app.next_focus();
        assert_eq!(handle_key_event(&mut app, ctrl_c), Action::Quit);

        app.next_focus();
        assert_eq!(handle_key_event(&mut app, ctrl_c), Action::Quit);
    }

    #[test]
    fn plain_c_does_not_quit_in_question_input() {
        let mut app = App::new();

        let action = handle_key_event(&mut app, key(KeyCode::Char('c')));

        assert_eq!(action, Action::None);
        assert_eq!(app.question_input(), "c");
    }

    #[test]
    fn tab_cycles_focus_and_backtab_reverses() {
        let mut app = App::new();

        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::AnswerView);

        handle_key_event(&mut app, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(app.focus(), Focus::QuestionInput);
    }

    #[test]
    fn esc_returns_to_question_input_and_clears_status() {
        let mut app = App::new();
        app.next_focus();
        app.set_warning("something");

        handle_key_event(&mut app, key(KeyCode::Esc));

        assert_eq!(app.focus(), Focus::QuestionInput);
        assert!(app.status().is_none());
    }

    #[test]
    fn typing_a_question_then_enter_requests_ask() {
        let mut app = App::new();

        handle_key_event(&mut app, key(KeyCode::Char('h')));
        handle_key_event(&mut app, key(KeyCode::Char('i')));
        assert_eq!(app.question_input(), "hi");

        let action = handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(action, Action::Ask);
    }

    #[test]
    fn shift_characters_are_accepted_in_inputs() {
        let mut app = App::new();

        let shifted = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        handle_key_event(&mut app, shifted);

        assert_eq!(app.question_input(), "W");
    }

    #[test]
    fn backspace_edits_the_focused_buffer() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Char('a')));
        handle_key_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.question_input(), "");

        // Feedback box gets its own buffer
        app.next_focus();
        app.next_focus();
        app.next_focus();
        assert_eq!(app.focus(), Focus::FeedbackInput);
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        handle_key_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.feedback_input(), "");
    }

    #[test]
    fn answer_view_scrolls_with_j_and_k() {
        let mut app = App::new();
        app.next_focus();
        assert_eq!(app.focus(), Focus::AnswerView);

        handle_key_event(&mut app, key(KeyCode::Char('j')));
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.answer_scroll(), 2);

        handle_key_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.answer_scroll(), 1);
    }

    #[test]
    fn q_quits_only_outside_text_inputs() {
        let mut app = App::new();

        // In the question input, q is a character
        assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('q'))), Action::None);
        assert_eq!(app.question_input(), "q");

        // In the answer view, q quits
        app.next_focus();
        assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn rating_selection_with_y_and_n() {
        let mut app = App::new();
        app.next_focus();
        app.next_focus();
        assert_eq!(app.focus(), Focus::RatingSelect);

        handle_key_event(&mut app, key(KeyCode::Char('y')));
        assert_eq!(app.rating_choice(), Some(Rating::Yes));

        handle_key_event(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.rating_choice(), Some(Rating::No));
    }

    #[test]
    fn arrow_keys_toggle_the_rating_choice() {
        let mut app = App::new();
        app.next_focus();
        app.next_focus();

        handle_key_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.rating_choice(), Some(Rating::Yes));

        handle_key_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.rating_choice(), Some(Rating::No));
    }

    #[test]
    fn enter_in_rating_focus_requests_submit() {
        let mut app = App::new();
        app.next_focus();
        app.next_focus();

        handle_key_event(&mut app, key(KeyCode::Char('y')));
        let action = handle_key_event(&mut app, key(KeyCode::Enter));

        assert_eq!(action, Action::SubmitRating);
    }

    #[test]
    fn enter_in_feedback_focus_requests_submit() {
        let mut app = App::new();
        app.prev_focus();
        assert_eq!(app.focus(), Focus::FeedbackInput);

        handle_key_event(&mut app, key(KeyCode::Char('x')));
        let action = handle_key_event(&mut app, key(KeyCode::Enter));

        assert_eq!(action, Action::SubmitFeedback);
    }
}
