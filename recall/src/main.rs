//! Memory-recall companion TUI.
//!
//! A terminal chat interface that helps a person revisit a personal
//! story: it asks guided questions, analyzes the answers, offers hints,
//! and tracks which memory fragments have been recalled.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for
//! automated testing:
//!
//! ```bash
//! cargo run -p recall -- --headless
//! ```

mod app;
mod events;
mod headless;
mod setup;
mod ui;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame, Terminal,
};
use recall_core::{RecallSession, SessionConfig, SessionError};
use std::io::{self, stdout};
use std::time::Duration;

use app::App;
use events::{handle_event, EventResult};
use setup::SetupScreen;
use ui::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // Check for API key
    if std::env::var("ANTHROPIC_API_KEY").is_err() {
        eprintln!("Error: ANTHROPIC_API_KEY environment variable not set.");
        eprintln!("Please set it in .env file or with: export ANTHROPIC_API_KEY=your_key_here");
        std::process::exit(1);
    }

    if args.iter().any(|a| a == "--headless") {
        return headless::run_headless(SessionConfig::new())
            .await
            .map_err(|e| e.into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Outcome of one session run.
enum Outcome {
    Quit,
    Reset,
}

/// Setup-then-recall loop. A reset tears the session down and returns
/// to the setup screen.
async fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>) -> io::Result<()> {
    let mut warning: Option<String> = None;

    loop {
        let Some((narrative, fragment_text)) = run_setup(terminal, warning.take())? else {
            return Ok(());
        };

        let mut session = match RecallSession::new(SessionConfig::new()) {
            Ok(session) => session,
            Err(e) => {
                warning = Some(format!("Could not start a session: {e}"));
                continue;
            }
        };

        // The first question is generated before the chat opens.
        terminal.draw(render_preparing)?;

        let app = match session.begin(&narrative, &fragment_text).await {
            Ok(_) => App::new(session),
            Err(SessionError::MissingInput) => {
                warning = Some("Please enter both your story and the memory fragments.".to_string());
                continue;
            }
            Err(SessionError::EmptyFragmentSet) => {
                warning =
                    Some("No usable memory fragments. Separate them with commas.".to_string());
                continue;
            }
            Err(e) => {
                // Gateway failures are fatal for the session: show the
                // diagnostic and halt until the user restarts.
                let mut app = App::new(session);
                app.halt(format!(
                    "The model call failed: {e}. Check your ANTHROPIC_API_KEY configuration, then restart."
                ));
                app
            }
        };

        match run_app(terminal, app).await? {
            Outcome::Reset => continue,
            Outcome::Quit => return Ok(()),
        }
    }
}

/// Run the setup screen until the user submits or cancels.
fn run_setup<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    warning: Option<String>,
) -> io::Result<Option<(String, String)>> {
    let mut setup = SetupScreen::new(warning);

    loop {
        terminal.draw(|f| setup.render(f, f.area()))?;

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            setup.handle_event(ev);
        }

        if setup.cancelled {
            return Ok(None);
        }

        if setup.finished {
            return Ok(Some((
                setup.narrative.value().to_string(),
                setup.fragments.value().to_string(),
            )));
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<Outcome> {
    // Track pending input for async processing
    let mut pending_input: Option<String> = None;

    loop {
        // Render
        terminal.draw(|f| render(f, &app))?;

        // Process any pending answer; the model call blocks the turn.
        if let Some(input) = pending_input.take() {
            app.busy = true;
            app.set_status("Thinking...");
            terminal.draw(|f| render(f, &app))?;

            match app.session.answer(&input).await {
                Ok(turn) => {
                    app.clear_status();
                    if let Some(ref revealed) = turn.revealed {
                        app.set_status(format!("The answer was \"{revealed}\""));
                    } else if !turn.newly_recalled.is_empty() {
                        app.set_status(format!("Recalled: {}", turn.newly_recalled.join(", ")));
                    }
                    if turn.done {
                        app.set_status("Every fragment found! Ctrl+R starts a new story.");
                    }
                }
                Err(SessionError::Gateway(e)) => {
                    app.halt(format!(
                        "The model call failed: {e}. Check your ANTHROPIC_API_KEY configuration, then restart."
                    ));
                }
                Err(e) => {
                    app.set_status(format!("Error: {e}"));
                }
            }
            app.busy = false;
            app.scroll_to_bottom();
        }

        // Poll for events
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(Outcome::Quit),
                EventResult::Submit => {
                    if let Some(input) = app.submit_input() {
                        pending_input = Some(input);
                    }
                }
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }

        if app.wants_reset {
            return Ok(Outcome::Reset);
        }
    }
}

fn render_preparing(frame: &mut Frame) {
    let rows = Layout::vertical([
        Constraint::Percentage(45),
        Constraint::Length(1),
        Constraint::Percentage(45),
    ])
    .split(frame.area());
    frame.render_widget(
        Paragraph::new("Preparing your first question...").centered(),
        rows[1],
    );
}

fn print_help() {
    println!("Memory Recall - guided recall conversations over a personal story");
    println!();
    println!("USAGE:");
    println!("  recall [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help       Show this help message");
    println!("  --headless       Run in headless mode (line-oriented, no TUI)");
    println!();
    println!("ENVIRONMENT:");
    println!("  ANTHROPIC_API_KEY   Required. Read from the environment or a .env file.");
    println!();
    println!("EXAMPLES:");
    println!("  recall                # Interactive TUI mode");
    println!("  recall --headless     # Line protocol on stdin/stdout");
}
