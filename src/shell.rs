//! Interactive menu loops for the two programs.
//!
//! Both loops follow the same input policy: a line that should hold a number
//! but does not, or that is not text at all, is reported and dropped, and the
//! menu comes back. End of input
//! behaves like the exit command.

pub mod library;
pub mod results;

use std::io::{BufRead, Write};

use colored::Colorize;

use crate::{console::Console, error::InputError};

/// Whether a menu loop goes on after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Show the menu again
    Continue,
    /// Leave the loop
    Exit,
}

/// Apply the shared input policy to the result of one command
///
/// `Format` errors are reported with `message` and `Encoding` errors with a
/// fixed line; the loop continues after either. `Closed` ends the loop.
/// Console failures propagate.
fn settle<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    result: Result<Flow, InputError>,
    message: &str,
) -> Result<Flow, InputError> {
    match result {
        Ok(flow) => Ok(flow),
        Err(InputError::Format(raw)) => {
            tracing::debug!(input = %raw, "rejected non-numeric input");
            console.say(format!("Error: {message}").as_str().red())?;
            Ok(Flow::Continue)
        }
        Err(InputError::Encoding(raw)) => {
            tracing::debug!(input = %raw, "rejected input that is not UTF-8");
            console.say("Error: Input must be valid UTF-8 text.".red())?;
            Ok(Flow::Continue)
        }
        Err(InputError::Closed) => Ok(Flow::Exit),
        Err(err) => Err(err),
    }
}

/// Print a menu title and its numbered options
fn print_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    title: &str,
    options: &[&str],
) -> Result<(), InputError> {
    console.say(format!("\n===== {title} =====").as_str().green().bold())?;
    for (number, option) in (1..).zip(options) {
        console.say(format!("{number}. {option}"))?;
    }
    Ok(())
}
