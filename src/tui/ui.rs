//! UI rendering functions for the TUI.
//!
//! Lays out the question input, answer panel, info sidebar, rating
//! control, feedback box, and status line using ratatui widgets.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{App, Focus, StatusKind};
use crate::feedback::Rating;

/// Placeholder shown in the answer panel before the first question.
const WELCOME_TEXT: &str = "Hi there! Ask me anything about the phonics, monthly topics, \
or classroom activities listed in the lesson plan.";

/// Main rendering function for the TUI.
///
/// Draws the full layout and applies focus indicators based on app state.
/// An extraction-failure banner, when present, takes one extra line at the
/// top; everything else stays usable underneath it.
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let constraints = if app.banner().is_some() {
        vec![
            Constraint::Length(1), // Banner
            Constraint::Length(3), // Question input
            Constraint::Min(0),    // Answer + sidebar
            Constraint::Length(3), // Rating control
            Constraint::Length(3), // Feedback input
            Constraint::Length(1), // Status line
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ]
    };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    let mut index = 0;
    if app.banner().is_some() {
        render_banner(frame, app, main_chunks[index]);
        index += 1;
    }

    render_question_input(frame, app, main_chunks[index]);

    // Split content area horizontally: answer (72%) | info sidebar (28%)
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(main_chunks[index + 1]);

    render_answer(frame, app, content_chunks[0]);
    render_sidebar(frame, content_chunks[1]);
    render_rating(frame, app, main_chunks[index + 2]);
    render_feedback_input(frame, app, main_chunks[index + 3]);
    render_status_bar(frame, app, main_chunks[index + 4]);
}

/// Border style for a panel, highlighted when it has focus.
fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Renders the persistent extraction-failure banner.
fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let text = app.banner().unwrap_or_default();
    let banner = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::White).bg(Color::Red),
    )));
    frame.render_widget(banner, area);
}

/// Renders the question input at the top of the screen.
fn render_question_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::QuestionInput);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("What would you like to know?")
        .border_style(border_style(is_focused));

    let mut content = app.question_input().to_string();
    if is_focused {
        content.push('█'); // Cursor indicator
    }

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

/// Renders the answer panel, or the welcome text before the first answer.
fn render_answer(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::AnswerView);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Here's what I found")
        .border_style(border_style(is_focused));

    let text = app.answer().unwrap_or(WELCOME_TEXT);

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.answer_scroll(), 0));
    frame.render_widget(paragraph, area);
}

/// Renders the static info sidebar.
fn render_sidebar(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Syllabus Assistant");

    let lines = vec![
        Line::from(Span::styled(
            "Preprimary lesson-plan Q&A",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Answers come only from the"),
        Line::from("loaded lesson-plan document."),
        Line::from(""),
        Line::from("Tab      switch panel"),
        Line::from("Enter    ask / submit"),
        Line::from("y / n    rate the answer"),
        Line::from("j / k    scroll the answer"),
        Line::from("Esc      back to question"),
        Line::from("Ctrl+C   quit"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Renders the two-choice rating control.
fn render_rating(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::RatingSelect);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Was this helpful?")
        .border_style(border_style(is_focused));

    let selected = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let unselected = Style::default();

    let (yes_style, no_style) = match app.rating_choice() {
        Some(Rating::Yes) => (selected, unselected),
        Some(Rating::No) => (unselected, selected),
        None => (unselected, unselected),
    };

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(" (y) yes, it helped ", yes_style),
        Span::raw("   "),
        Span::styled(" (n) not really ", no_style),
        Span::raw("   Enter to submit"),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

/// Renders the free-text feedback box.
fn render_feedback_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::FeedbackInput);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Found something buggy or tricky? Let us know")
        .border_style(border_style(is_focused));

    let mut content = app.feedback_input().to_string();
    if is_focused {
        content.push('█');
    }

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

/// Renders the status line: a styled message, or key hints when idle.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.status() {
        Some(status) => {
            let style = match status.kind() {
                StatusKind::Info => Style::default().fg(Color::Green),
                StatusKind::Warning => Style::default().fg(Color::Yellow),
                StatusKind::Error => Style::default().fg(Color::Red),
            };
            Line::from(Span::styled(status.text().to_string(), style))
        }
        None => Line::from(Span::styled(
            " Tab: switch panel · Enter: ask/submit · Esc: back · Ctrl+C: quit",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_layout_reserves_fixed_rows_for_inputs() {
        let area = Rect::new(0, 0, 100, 40);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        assert_eq!(chunks[0].height, 3, "question input is 3 lines tall");
        assert_eq!(chunks[2].height, 3, "rating control is 3 lines tall");
        assert_eq!(chunks[3].height, 3, "feedback input is 3 lines tall");
        assert_eq!(chunks[4].height, 1, "status line is 1 line tall");
        assert_eq!(chunks[1].height, 40 - 3 - 3 - 3 - 1, "answer takes the rest");
    }

    #[test]
    fn content_split_gives_answer_the_wide_panel() {
        let area = Rect::new(0, 0, 100, 30);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
            .split(area);

        let total = chunks[0].width + chunks[1].width;
        let left = (chunks[0].width as f32 / total as f32) * 100.0;
        assert!(
            (left - 72.0).abs() < 5.0,
            "answer panel should be approximately 72% wide, got {left}%"
        );
    }

    #[test]
    fn banner_layout_adds_one_row() {
        let area = Rect::new(0, 0, 100, 40);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        assert_eq!(chunks[0].height, 1, "banner is a single line");
        assert_eq!(chunks[1].height, 3, "question input keeps its height");
    }

    #[test]
    fn focused_border_style_differs_from_unfocused() {
        assert_ne!(border_style(true), border_style(false));
    }
}
