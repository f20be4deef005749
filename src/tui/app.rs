use crate::feedback::Rating;

/// Warning shown when the ask action fires with an empty question.
pub const EMPTY_QUESTION_WARNING: &str = "Please type your question before asking.";

/// Warning shown when the feedback submit fires with an empty comment.
pub const EMPTY_FEEDBACK_WARNING: &str = "Please enter feedback before submitting.";

/// Application state for the TUI.
///
/// Owns the input buffers, the rendered answer, the rating selection, and
/// the transient status/banner messages. Pure state: no I/O happens here,
/// which keeps every transition unit-testable.
#[derive(Debug, Clone)]
pub struct App {
    /// Question input buffer
    question_input: String,
    /// Free-text feedback input buffer
    feedback_input: String,
    /// The most recent answer, if any
    answer: Option<String>,
    /// Persistent page-level banner (document extraction failure)
    banner: Option<String>,
    /// Transient status line content
    status: Option<StatusMessage>,
    /// Currently selected rating choice (not yet submitted)
    rating_choice: Option<Rating>,
    /// Currently focused panel
    focus: Focus,
    /// Scroll offset for the answer panel
    answer_scroll: u16,
}

/// Panel focus state for keyboard navigation.
///
/// Determines which panel receives keyboard input and how keys are
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Question input bar is focused (typing edits the question)
    QuestionInput,
    /// Answer panel is focused (j/k scrolling)
    AnswerView,
    /// Rating control is focused (y/n choose, Enter submits)
    RatingSelect,
    /// Free-text feedback box is focused (typing edits, Enter submits)
    FeedbackInput,
}

/// Severity of a status-line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Confirmation of a completed action
    Info,
    /// Input validation problem; nothing was done
    Warning,
    /// A service or storage operation failed; the user may retry
    Error,
}

/// One transient message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    kind: StatusKind,
    text: String,
}

impl StatusMessage {
    /// Returns the message severity.
    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new App with default state.
    ///
    /// Default focus is `QuestionInput`; buffers are empty and there is no
    /// answer, rating, banner, or status message yet.
    pub fn new() -> Self {
        Self {
            question_input: String::new(),
            feedback_input: String::new(),
            answer: None,
            banner: None,
            status: None,
            rating_choice: None,
            focus: Focus::QuestionInput,
            answer_scroll: 0,
        }
    }

    /// Returns the question input buffer.
    pub fn question_input(&self) -> &str {
        &self.question_input
    }

    /// Returns the feedback input buffer.
    pub fn feedback_input(&self) -> &str {
        &self.feedback_input
    }

    /// Returns the most recent answer, if one has been produced.
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    /// Returns the persistent banner text, if any.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Returns the current status message, if any.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Returns the currently selected (unsubmitted) rating.
    pub fn rating_choice(&self) -> Option<Rating> {
        self.rating_choice
    }

    /// Returns the current focus state.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns the answer panel scroll offset.
    pub fn answer_scroll(&self) -> u16 {
        self.answer_scroll
    }

    /// Sets the persistent banner (document extraction failure).
    pub fn set_banner(&mut self, text: impl Into<String>) {
        self.banner = Some(text.into());
    }

    /// Stores a fresh answer, resetting scroll and the rating choice.
    pub fn set_answer(&mut self, answer: impl Into<String>) {
        self.answer = Some(answer.into());
        self.answer_scroll = 0;
        self.rating_choice = None;
    }

    /// Appends a character to the question buffer.
    pub fn push_question_char(&mut self, c: char) {
        self.question_input.push(c);
    }

    /// Removes the last character from the question buffer.
    pub fn pop_question_char(&mut self) {
        self.question_input.pop();
    }

    /// Appends a character to the feedback buffer.
    pub fn push_feedback_char(&mut self, c: char) {
        self.feedback_input.push(c);
    }

    /// Removes the last character from the feedback buffer.
    pub fn pop_feedback_char(&mut self) {
        self.feedback_input.pop();
    }

    /// Selects a rating choice (submitted separately).
    pub fn select_rating(&mut self, rating: Rating) {
        self.rating_choice = Some(rating);
    }

    /// Cycles focus forward: question -> answer -> rating -> feedback.
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::QuestionInput => Focus::AnswerView,
            Focus::AnswerView => Focus::RatingSelect,
            Focus::RatingSelect => Focus::FeedbackInput,
            Focus::FeedbackInput => Focus::QuestionInput,
        };
    }

    /// Cycles focus backward.
    pub fn prev_focus(&mut self) {
        self.focus = match self.focus {
            Focus::QuestionInput => Focus::FeedbackInput,
            Focus::AnswerView => Focus::QuestionInput,
            Focus::RatingSelect => Focus::AnswerView,
            Focus::FeedbackInput => Focus::RatingSelect,
        };
    }

    /// Returns focus to the question input.
    pub fn reset_focus(&mut self) {
        self.focus = Focus::QuestionInput;
    }

    /// Scrolls the answer panel down.
    pub fn scroll_answer_down(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_add(amount);
    }

    /// Scrolls the answer panel up.
    pub fn scroll_answer_up(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_sub(amount);
    }

    /// Sets an informational status message.
    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    /// Sets a validation warning.
    pub fn set_warning(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Warning,
            text: text.into(),
        });
    }

    /// Sets an error message.
    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }

    /// Clears the transient status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Validates and returns the question to ask.
    ///
    /// An empty or whitespace-only buffer sets a validation warning and
    /// returns `None`; the answer service must never be called in that
    /// case. The buffer itself is left untouched so the user can edit it.
    pub fn take_ask_request(&mut self) -> Option<String> {
        let question = self.question_input.trim();
        if question.is_empty() {
            self.set_warning(EMPTY_QUESTION_WARNING);
            return None;
        }
        Some(question.to_string())
    }

    /// Validates and returns the free-text feedback to persist.
    ///
    /// An empty or whitespace-only buffer sets a validation warning and
    /// returns `None`; the store must never be called in that case. On
    /// success the buffer is cleared.
    pub fn take_open_feedback_request(&mut self) -> Option<String> {
        let comment = self.feedback_input.trim();
        if comment.is_empty() {
            self.set_warning(EMPTY_FEEDBACK_WARNING);
            return None;
        }
        let comment = comment.to_string();
        self.feedback_input.clear();
        Some(comment)
    }
}
