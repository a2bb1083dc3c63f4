//! Headless mode for the recall companion.
//!
//! This module provides a simple text-based interface for running the
//! dialogue without a TUI. It's designed for:
//! - Automated testing with real model responses
//! - Script-driven recall sessions

use recall_core::{RecallSession, SessionConfig, SessionError};
use std::io::{self, BufRead};

/// Run the dialogue in headless mode.
///
/// This provides a simple line-oriented protocol:
/// - The story is read first, terminated by a single `.` line
/// - The fragment line follows
/// - Lines starting with `#` are commands (status, export, quit)
/// - All other input is treated as an answer
pub async fn run_headless(config: SessionConfig) -> Result<(), SessionError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("=== Memory Recall Headless Mode ===");
    println!("Enter your story. Finish with a single '.' on its own line:");

    let mut narrative = String::new();
    for line in lines.by_ref() {
        let line = line?;
        if line.trim() == "." {
            break;
        }
        if !narrative.is_empty() {
            narrative.push('\n');
        }
        narrative.push_str(&line);
    }

    println!("Enter the memory fragments (comma separated):");
    let fragment_text = match lines.next() {
        Some(line) => line?,
        None => return Ok(()),
    };

    let mut session = RecallSession::new(config)?;
    match session.begin(&narrative, &fragment_text).await {
        Ok(question) => {
            println!();
            println!("{question}");
        }
        Err(err @ (SessionError::MissingInput | SessionError::EmptyFragmentSet)) => {
            println!("[ERROR] {err}");
            return Ok(());
        }
        Err(err) => return Err(err),
    }

    print_status(&session);
    println!();
    println!("Answer the questions one line at a time.");
    println!("Commands: #status, #export <path>, #help, #quit");
    println!();

    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Handle commands
        if let Some(command) = line.strip_prefix('#') {
            let parts: Vec<&str> = command.split_whitespace().collect();
            match parts.first().copied() {
                Some("quit") | Some("exit") => {
                    println!("Goodbye!");
                    break;
                }
                Some("status") => print_status(&session),
                Some("export") => {
                    if let Some(path) = parts.get(1) {
                        match session.export_transcript(path).await {
                            Ok(()) => println!("[EXPORTED] Transcript written to {path}"),
                            Err(e) => println!("[ERROR] Export failed: {e}"),
                        }
                    } else {
                        println!("[ERROR] Usage: #export <path>");
                    }
                }
                Some("help") => {
                    println!("Commands: #status, #export <path>, #help, #quit");
                }
                Some(other) => println!("[ERROR] Unknown command: #{other}"),
                None => {}
            }
            continue;
        }

        // Treat the line as an answer
        match session.answer(line).await {
            Ok(turn) => {
                for message in &turn.messages {
                    println!();
                    println!("{message}");
                }
                print_status(&session);
                if turn.done {
                    break;
                }
            }
            Err(err @ SessionError::Gateway(_)) => {
                println!("[ERROR] Model call failed: {err}");
                println!("Check your ANTHROPIC_API_KEY configuration, then restart.");
                return Err(err);
            }
            Err(err) => println!("[ERROR] {err}"),
        }
    }

    Ok(())
}

fn print_status(session: &RecallSession) {
    let (recalled, total) = session.progress();
    let usage = session.token_usage();
    println!(
        "[STATUS] {recalled}/{total} recalled | outstanding: {} | tokens: {}",
        session.outstanding().join(", "),
        usage.total
    );
}
