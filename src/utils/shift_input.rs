//! Shift parameter input.
//!
//! Parses shift values from text and runs the interactive prompt loop used
//! when the CLI is not given shifts on the command line.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::error::PipelineError;

/// Parses a signed decimal shift value, ignoring surrounding whitespace.
///
/// # Errors
/// Returns [`PipelineError::InvalidShift`] if the trimmed text is not an `i64`.
///
/// # Examples
///
/// ```
/// use metashift::utils::shift_input::parse_shift;
///
/// assert_eq!(parse_shift(" -12\n").unwrap(), -12);
/// assert!(parse_shift("3.5").is_err());
/// ```
pub fn parse_shift(input: &str) -> Result<i64, PipelineError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| PipelineError::InvalidShift(trimmed.to_string()))
}

/// Prompts for `label` until a valid integer is entered.
///
/// Invalid lines print `Please enter an integer.` and ask again.
///
/// # Errors
/// Returns [`PipelineError::Io`] if the input ends before a valid value is
/// read, or if reading or writing fails.
pub fn prompt_shift<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<i64, PipelineError> {
    let mut line = String::new();
    loop {
        write!(output, "Enter {} (integer): ", label)
            .and_then(|_| output.flush())
            .map_err(|e| PipelineError::io("<stdout>", e))?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|e| PipelineError::io("<stdin>", e))?;
        if read == 0 {
            return Err(PipelineError::io(
                "<stdin>",
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("input ended before {} was entered", label),
                ),
            ));
        }

        match parse_shift(&line) {
            Ok(value) => return Ok(value),
            Err(err) => {
                debug!(%err, label, "rejected shift input");
                writeln!(output, "Please enter an integer.")
                    .map_err(|e| PipelineError::io("<stdout>", e))?;
            }
        }
    }
}
