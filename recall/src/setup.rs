//! Session setup screen.
//!
//! Collects the narrative and the comma-delimited memory fragments
//! before the recall dialogue starts.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::TextField;
use crate::ui::theme::RecallTheme;

/// Which setup field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupField {
    #[default]
    Narrative,
    Fragments,
}

/// Setup screen state.
pub struct SetupScreen {
    pub narrative: TextField,
    pub fragments: TextField,
    pub focused: SetupField,
    pub warning: Option<String>,
    pub finished: bool,
    pub cancelled: bool,
    theme: RecallTheme,
}

impl SetupScreen {
    pub fn new(warning: Option<String>) -> Self {
        Self {
            narrative: TextField::default(),
            fragments: TextField::default(),
            focused: SetupField::default(),
            warning,
            finished: false,
            cancelled: false,
            theme: RecallTheme::default(),
        }
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.focused {
            SetupField::Narrative => &mut self.narrative,
            SetupField::Fragments => &mut self.fragments,
        }
    }

    /// Handle keyboard input.
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.cancelled = true;
            return;
        }

        match key.code {
            KeyCode::Esc => self.cancelled = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused = match self.focused {
                    SetupField::Narrative => SetupField::Fragments,
                    SetupField::Fragments => SetupField::Narrative,
                };
            }
            KeyCode::Enter => match self.focused {
                // The story is free text; Enter inserts a line break.
                SetupField::Narrative => self.narrative.insert('\n'),
                SetupField::Fragments => self.try_finish(),
            },
            KeyCode::Char(c) => {
                self.warning = None;
                self.focused_field().insert(c);
            }
            KeyCode::Backspace => self.focused_field().backspace(),
            KeyCode::Delete => self.focused_field().delete(),
            KeyCode::Left => self.focused_field().cursor_left(),
            KeyCode::Right => self.focused_field().cursor_right(),
            KeyCode::Home => self.focused_field().cursor_home(),
            KeyCode::End => self.focused_field().cursor_end(),
            _ => {}
        }
    }

    fn try_finish(&mut self) {
        if self.narrative.value().trim().is_empty() || self.fragments.value().trim().is_empty() {
            self.warning =
                Some("Please enter both your story and the memory fragments.".to_string());
            return;
        }
        self.finished = true;
    }

    /// Render the setup screen.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            " Memory Recall - tell me a story you want to revisit ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, chunks[0]);

        self.render_field(
            frame,
            chunks[1],
            " Your story ",
            &self.narrative,
            self.focused == SetupField::Narrative,
        );
        self.render_field(
            frame,
            chunks[2],
            " Memory fragments (comma separated) ",
            &self.fragments,
            self.focused == SetupField::Fragments,
        );

        if let Some(ref warning) = self.warning {
            let line = Line::from(Span::styled(warning.clone(), self.theme.warning_style()));
            frame.render_widget(Paragraph::new(line), chunks[3]);
        }

        let help = Line::from(Span::styled(
            " Tab switch field | Enter in fragments starts | Esc quit ",
            self.theme.system_style(),
        ));
        frame.render_widget(Paragraph::new(help), chunks[4]);
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        field: &TextField,
        focused: bool,
    ) {
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(focused));

        // Show the cursor as a block character in the focused field.
        let mut text = field.value().to_string();
        if focused {
            let byte_pos = text
                .char_indices()
                .nth(field.cursor())
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            text.insert(byte_pos, '▌');
        }

        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(screen: &mut SetupScreen, text: &str) {
        for c in text.chars() {
            screen.handle_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_finish_requires_both_fields() {
        let mut screen = SetupScreen::new(None);
        type_text(&mut screen, "a story");

        screen.handle_event(key(KeyCode::Tab));
        screen.handle_event(key(KeyCode::Enter));

        assert!(!screen.finished);
        assert!(screen.warning.is_some());

        type_text(&mut screen, "graduation, rain");
        screen.handle_event(key(KeyCode::Enter));
        assert!(screen.finished);
    }

    #[test]
    fn test_enter_in_narrative_inserts_newline() {
        let mut screen = SetupScreen::new(None);
        type_text(&mut screen, "line one");
        screen.handle_event(key(KeyCode::Enter));
        type_text(&mut screen, "line two");

        assert_eq!(screen.narrative.value(), "line one\nline two");
        assert!(!screen.finished);
    }

    #[test]
    fn test_escape_cancels() {
        let mut screen = SetupScreen::new(None);
        screen.handle_event(key(KeyCode::Esc));
        assert!(screen.cancelled);
    }
}
