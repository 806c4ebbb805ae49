//! # Input Script
//!
//! Line sources for the host loop: a scripted list of lines for
//! deterministic runs and demos, or any buffered reader (stdin).
//!
//! ## Format
//!
//! Scripts are line-based, one shell input per line:
//! - Commands: `cd /system`, `ls`, `vp color.conf`
//! - Comments: `# This is a comment`
//! - Blank lines are skipped
//!
//! Editor content follows an `edit` line verbatim and ends at a line holding
//! a single `.`.
//!
//! ## Example
//!
//! ```text
//! # Make a note and read it back
//! mf note.txt
//! edit note.txt
//! remember the milk
//! .
//! vw note.txt
//! ```

use std::collections::VecDeque;
use std::io::BufRead;
use thiserror::Error;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Empty script")]
    EmptyScript,

    #[error("Read error: {0}")]
    Read(String),
}

/// A source of input lines
pub trait LineSource {
    /// Returns the next line without its terminator, or `None` at the end
    fn next_line(&mut self) -> Result<Option<String>, InputScriptError>;

    /// Returns true when lines come from a script rather than a person
    fn is_scripted(&self) -> bool;
}

/// Input script
///
/// Parses and provides scripted input lines for deterministic runs.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    lines: VecDeque<String>,
}

impl InputScript {
    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let lines: VecDeque<String> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| {
                let trimmed = line.trim_start();
                !trimmed.is_empty() && !trimmed.starts_with('#')
            })
            .map(str::to_string)
            .collect();

        if lines.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { lines })
    }

    /// Returns true if the script has more lines
    pub fn has_more(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Returns the number of remaining lines
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for InputScript {
    fn next_line(&mut self) -> Result<Option<String>, InputScriptError> {
        Ok(self.lines.pop_front())
    }

    fn is_scripted(&self) -> bool {
        true
    }
}

/// Lines read interactively from a buffered reader
pub struct ReaderSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, InputScriptError> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| InputScriptError::Read(e.to_string()))?;

        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn is_scripted(&self) -> bool {
        false
    }
}
