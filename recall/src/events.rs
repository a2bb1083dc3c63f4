//! Event handling for the recall TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::App;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
    /// The user submitted the input line; the main loop runs the turn.
    Submit,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.scroll_up(3);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.scroll_down(3);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => EventResult::Quit,
            KeyCode::Char('r') => {
                app.wants_reset = true;
                EventResult::NeedsRedraw
            }
            _ => EventResult::Continue,
        };
    }

    match key.code {
        // Transcript navigation
        KeyCode::Up => {
            app.scroll_up(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Down => {
            app.scroll_down(1);
            EventResult::NeedsRedraw
        }
        KeyCode::PageUp => {
            app.scroll_up(10);
            EventResult::NeedsRedraw
        }
        KeyCode::PageDown => {
            app.scroll_down(10);
            EventResult::NeedsRedraw
        }

        // Input line editing
        KeyCode::Enter => {
            if app.input_enabled() {
                EventResult::Submit
            } else {
                EventResult::Continue
            }
        }
        KeyCode::Char(c) => {
            if app.input_enabled() {
                app.input.insert(c);
                app.clear_status();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            if app.input_enabled() {
                app.input.backspace();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            if app.input_enabled() {
                app.input.delete();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Left => {
            app.input.cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.input.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.input.cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.input.cursor_end();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
