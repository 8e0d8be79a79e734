use anyhow::{Context, Result};
use std::io::{self, IsTerminal, Read};

pub struct InputReader;

impl InputReader {
    /// Returns `true` when stdin is an interactive terminal rather than a pipe.
    pub fn stdin_is_terminal() -> bool {
        io::stdin().is_terminal()
    }

    pub fn read_stdin() -> Result<String> {
        Self::read_from(io::stdin().lock())
    }

    /// Reads `reader` to end-of-stream.
    ///
    /// Only I/O errors fail; invalid UTF-8 sequences are replaced with
    /// U+FFFD.
    pub fn read_from<R: Read>(mut reader: R) -> Result<String> {
        let mut buffer = Vec::new();
        reader
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;

        Ok(match String::from_utf8(buffer) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }
}

/// Whether `input` carries no work (empty or whitespace only).
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// The input as echoed back to the user: a single trailing `\n` removed.
pub fn echo_text(input: &str) -> &str {
    input.strip_suffix('\n').unwrap_or(input)
}
