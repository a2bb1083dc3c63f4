//! Color theme and styling for the recall TUI

use ratatui::style::{Color, Modifier, Style};

/// UI color theme
#[derive(Debug, Clone)]
pub struct RecallTheme {
    // Base colors
    pub border: Color,
    pub border_focused: Color,

    // Text colors
    pub user_text: Color,
    pub assistant_text: Color,
    pub system_text: Color,
    pub warning_text: Color,

    // Fragment tag colors
    pub recalled_tag: Color,
    pub outstanding_tag: Color,

    // Progress gauge
    pub progress: Color,
}

impl Default for RecallTheme {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            user_text: Color::Cyan,
            assistant_text: Color::White,
            system_text: Color::DarkGray,
            warning_text: Color::Yellow,

            recalled_tag: Color::Green,
            outstanding_tag: Color::Yellow,

            progress: Color::Green,
        }
    }
}

impl RecallTheme {
    /// Get style for assistant messages
    pub fn assistant_style(&self) -> Style {
        Style::default().fg(self.assistant_text)
    }

    /// Get style for user messages
    pub fn user_style(&self) -> Style {
        Style::default()
            .fg(self.user_text)
            .add_modifier(Modifier::ITALIC)
    }

    /// Get style for system/help text
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get style for warnings and diagnostics
    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning_text)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for recalled fragment tags
    pub fn recalled_style(&self) -> Style {
        Style::default().fg(self.recalled_tag)
    }

    /// Get style for outstanding fragment tags
    pub fn outstanding_style(&self) -> Style {
        Style::default().fg(self.outstanding_tag)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}
