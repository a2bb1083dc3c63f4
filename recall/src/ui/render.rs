//! Render orchestration for the recall TUI

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::theme::RecallTheme;
use crate::ui::widgets::{FragmentPanelWidget, InputWidget, StatusBarWidget, TranscriptWidget};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let theme = RecallTheme::default();
    let area = frame.area();

    let rows = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(6),    // conversation + sidebar
        Constraint::Length(1), // status bar
        Constraint::Length(3), // input
    ])
    .split(area);

    render_title(frame, app, rows[0]);

    let columns =
        Layout::horizontal([Constraint::Percentage(68), Constraint::Percentage(32)]).split(rows[1]);

    let transcript = TranscriptWidget::new(app.session.transcript(), &theme)
        .scroll(app.scroll)
        .busy(app.busy);
    frame.render_widget(transcript, columns[0]);

    let outstanding = app.session.outstanding();
    let sidebar = FragmentPanelWidget::new(
        app.session.recalled(),
        &outstanding,
        app.session.progress(),
        app.session.token_usage(),
        &theme,
    );
    frame.render_widget(sidebar, columns[1]);

    let status = StatusBarWidget::new(app.session.phase(), &theme)
        .message(app.status_message())
        .halted(app.halted);
    frame.render_widget(status, rows[2]);

    render_input(frame, app, &theme, rows[3]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let (recalled, total) = app.session.progress();
    let title = format!(" Memory Recall | {recalled} of {total} fragments found ");

    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_input(frame: &mut Frame, app: &App, theme: &RecallTheme, area: Rect) {
    let placeholder = if app.halted {
        "Session halted. Press Ctrl+C to quit."
    } else if app.busy {
        "Thinking..."
    } else if app.session.is_done() {
        "Session complete. Press Ctrl+R for a new story."
    } else {
        "Type your answer..."
    };

    let input = InputWidget::new(app.input.value(), theme)
        .cursor_position(app.input.cursor())
        .placeholder(placeholder)
        .active(app.input_enabled());
    frame.render_widget(input, area);
}
