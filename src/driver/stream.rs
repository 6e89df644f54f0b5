//! Line Stream
//!
//! Reads newline-delimited JSON commands and writes one JSON response per line.

use std::io::{BufRead, Write};

use tracing::info;

use super::handlers::Session;
use crate::error::Result;

/// Runs every command from `input` against the session, writing responses to
/// `output`.
///
/// Blank lines are skipped. Malformed lines produce an error response and
/// processing continues. Returns the number of commands handled.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> Result<usize> {
    let mut handled = 0;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = session.handle_line(line);
        serde_json::to_writer(&mut output, &response).map_err(std::io::Error::from)?;
        output.write_all(b"\n")?;
        output.flush()?;
        handled += 1;
    }

    info!("Input closed after {} commands", handled);
    Ok(handled)
}
