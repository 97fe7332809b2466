//! Console input and output.
//!
//! Everything that touches the terminal lives here, generic over the reader
//! and writer so it can be driven from tests.

use anyhow::Result;
use lingo_core::{reply, session::RequestOutcome};
use std::io::{self, BufRead, Write};

/// Writes `label`, then reads one line. The trailing newline is stripped.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<String> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before a line was entered",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prints a request outcome under `header`.
///
/// Replies are printed in order until one fails to parse; that error is
/// returned and nothing after it is printed.
pub fn print_outcome<W: Write>(
    output: &mut W,
    header: &str,
    outcome: RequestOutcome,
) -> Result<()> {
    writeln!(output, "{header}")?;
    match outcome {
        RequestOutcome::Completed(replies) => {
            for answer in replies {
                let value = answer.parsed?;
                writeln!(output, "{}", reply::to_pretty_json(&value)?)?;
            }
        }
        RequestOutcome::NotCompleted(status) => {
            writeln!(output, "Run status: {status}")?;
        }
    }
    Ok(())
}
