use anyhow::{Context, Result};
use horn::{parse_line, Engine};
use inquire::{InquireError, Text};

use crate::error_formatter;
use crate::formatter::Formatter;

/// Read-resolve-print loop over an engine session.
///
/// Lines ending in a period are stored as facts or rules; anything else
/// resolves as a query and prints its answer. `halt` or `quit` leaves the
/// loop, as does cancelling the prompt.
pub fn run(engine: &mut Engine) -> Result<()> {
    let formatter = Formatter::default();
    println!("Facts and rules end with '.', queries don't. Type 'halt' to leave.");

    loop {
        let line = match Text::new("?-")
            .with_help_message("likes(a, b). asserts, likes(a, X) asks")
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                break;
            }
            Err(e) => return Err(e).context("Failed to read input"),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "halt" || trimmed == "quit" {
            break;
        }

        match parse_line(trimmed, None) {
            Ok(clause) => match engine.resolve(clause) {
                Ok(Some(answer)) => {
                    println!("{}", formatter.format_resolution(&answer));
                    println!();
                }
                Ok(None) => {}
                Err(error) => eprintln!("{}", error_formatter::format_error(&error)),
            },
            Err(error) => eprintln!("{}", error_formatter::format_error(&error)),
        }
    }

    Ok(())
}
