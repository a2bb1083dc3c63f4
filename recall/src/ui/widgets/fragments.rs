//! Fragment progress sidebar widget

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

use recall_core::TokenUsage;

use crate::ui::theme::RecallTheme;

/// Sidebar showing recalled/outstanding fragment tags, the recall
/// progress gauge, and the cumulative token counters.
pub struct FragmentPanelWidget<'a> {
    recalled: &'a [String],
    outstanding: &'a [String],
    progress: (usize, usize),
    usage: TokenUsage,
    theme: &'a RecallTheme,
}

impl<'a> FragmentPanelWidget<'a> {
    pub fn new(
        recalled: &'a [String],
        outstanding: &'a [String],
        progress: (usize, usize),
        usage: TokenUsage,
        theme: &'a RecallTheme,
    ) -> Self {
        Self {
            recalled,
            outstanding,
            progress,
            usage,
            theme,
        }
    }

    fn tag_line(&self, fragments: &[String], style: ratatui::style::Style) -> Line<'static> {
        if fragments.is_empty() {
            return Line::from(Span::styled("...", self.theme.system_style()));
        }
        let tags = fragments
            .iter()
            .map(|f| format!("[{f}]"))
            .collect::<Vec<_>>()
            .join(" ");
        Line::from(Span::styled(tags, style))
    }
}

impl Widget for FragmentPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Memory fragments ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // gauge
            Constraint::Length(1), // spacer
            Constraint::Length(1), // recalled header
            Constraint::Length(3), // recalled tags
            Constraint::Length(1), // outstanding header
            Constraint::Length(3), // outstanding tags
            Constraint::Length(1), // spacer
            Constraint::Length(1), // tokens header
            Constraint::Min(2),    // token counters
        ])
        .split(inner);

        let (recalled, total) = self.progress;
        let ratio = if total > 0 {
            recalled as f64 / total as f64
        } else {
            0.0
        };
        let label = if total > 0 && recalled == total {
            "All fragments found!".to_string()
        } else {
            format!("{recalled} / {total}")
        };
        let gauge = Gauge::default()
            .ratio(ratio)
            .label(label)
            .gauge_style(self.theme.recalled_style());
        gauge.render(chunks[0], buf);

        Paragraph::new(Line::from(Span::styled(
            "Recalled",
            self.theme.recalled_style(),
        )))
        .render(chunks[2], buf);
        Paragraph::new(self.tag_line(self.recalled, self.theme.recalled_style()))
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);

        Paragraph::new(Line::from(Span::styled(
            "Still to find",
            self.theme.outstanding_style(),
        )))
        .render(chunks[4], buf);
        Paragraph::new(self.tag_line(self.outstanding, self.theme.outstanding_style()))
            .wrap(Wrap { trim: true })
            .render(chunks[5], buf);

        Paragraph::new(Line::from(Span::styled(
            "Tokens used",
            self.theme.system_style(),
        )))
        .render(chunks[7], buf);
        let usage = self.usage;
        Paragraph::new(vec![
            Line::from(Span::raw(format!("total {}", usage.total))),
            Line::from(Span::styled(
                format!("prompt {} / completion {}", usage.prompt, usage.completion),
                self.theme.system_style(),
            )),
        ])
        .render(chunks[8], buf);
    }
}
