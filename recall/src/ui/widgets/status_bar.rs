//! Status bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use recall_core::Phase;

use crate::ui::theme::RecallTheme;

/// One-line status bar: phase, current message, key hints.
pub struct StatusBarWidget<'a> {
    phase: Phase,
    message: Option<&'a str>,
    halted: bool,
    theme: &'a RecallTheme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(phase: Phase, theme: &'a RecallTheme) -> Self {
        Self {
            phase,
            message: None,
            halted: false,
            theme,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    pub fn halted(mut self, halted: bool) -> Self {
        self.halted = halted;
        self
    }

    fn phase_label(&self) -> &'static str {
        if self.halted {
            return " HALTED ";
        }
        match self.phase {
            Phase::Start | Phase::Init => " SETUP ",
            Phase::Recalling => " RECALLING ",
            Phase::Completed | Phase::Done => " DONE ",
        }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let phase_style = if self.halted {
            self.theme.warning_style()
        } else {
            self.theme.system_style()
        };

        let mut spans = vec![Span::styled(self.phase_label(), phase_style)];

        if let Some(message) = self.message {
            let style = if self.halted {
                self.theme.warning_style()
            } else {
                self.theme.assistant_style()
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(message.to_string(), style));
        }

        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "Up/Down scroll | Ctrl+R new story | Ctrl+C quit",
            self.theme.system_style(),
        ));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
