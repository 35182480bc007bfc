//! Line-based loader for the extended INI format.
//!
//! Each line is classified in a fixed order (important for correctness):
//! 1. Comment lines (trimmed text starts with `;`)
//! 2. Blank lines
//! 3. Section headers (raw line starts with `[`)
//! 4. Assignments (line contains `=`)
//! 5. Anything else is an error
//!
//! Section headers compose a dot-terminated path prefix that is prepended
//! to subsequent keys. Comment blocks attach to the next assignment, and
//! `.=` repeats the last assigned key.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::document::{Ini, Record};
use crate::error::{FormatError, LoadError};

/// Parse state threaded through one load call.
#[derive(Debug, Default)]
struct LoadState {
    /// Dot-terminated section prefix, empty at root.
    path: String,
    /// Comment lines waiting for the next assignment.
    pending_comments: Vec<String>,
    /// Most recently composed key, reused by the `.=` shorthand.
    last_key: Option<String>,
}

impl Ini {
    /// Load configuration text, appending to existing contents.
    ///
    /// Fail-fast: a malformed line aborts the call with a [`FormatError`],
    /// keeping every record appended by the lines before it.
    pub fn load_str(&mut self, text: &str) -> Result<(), FormatError> {
        let mut state = LoadState::default();
        for (index, line) in text.lines().enumerate() {
            self.apply_line(&mut state, line, index + 1)?;
        }
        Ok(())
    }

    /// Load from a buffered reader, line by line.
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> Result<(), LoadError> {
        let mut state = LoadState::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            self.apply_line(&mut state, &line, index + 1)?;
        }
        Ok(())
    }

    /// Load from raw bytes, decoded as UTF-8 with invalid sequences
    /// replaced.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        let text = String::from_utf8_lossy(bytes);
        self.load_str(&text).map_err(LoadError::from)
    }

    /// Load the file at `path`. The handle is held only for the duration of
    /// the call and released on every exit path.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let file = File::open(path)?;
        self.load_reader(BufReader::new(file))
    }

    fn apply_line(
        &mut self,
        state: &mut LoadState,
        line: &str,
        line_no: usize,
    ) -> Result<(), FormatError> {
        let trimmed = line.trim();

        if trimmed.starts_with(';') {
            state.pending_comments.push(trimmed.to_string());
            return Ok(());
        }

        // Blank lines clear neither pending comments nor the last key.
        if trimmed.is_empty() {
            return Ok(());
        }

        if line.starts_with('[') {
            return section_header(state, line, trimmed, line_no);
        }

        if let Some(equals) = trimmed.find('=') {
            let left = &trimmed[..equals];
            let value = &trimmed[equals + 1..];

            let key = if left == "." {
                // Shorthand: reuse the full composed key of the previous
                // assignment. Section headers reset it.
                match &state.last_key {
                    Some(key) => key.clone(),
                    None => return Err(FormatError::UnrecognizedLine { line: line_no }),
                }
            } else {
                let key = format!("{}{}", state.path, left);
                state.last_key = Some(key.clone());
                key
            };

            let comments = std::mem::take(&mut state.pending_comments);
            self.append(key, Record::new(value, comments));
            return Ok(());
        }

        Err(FormatError::UnrecognizedLine { line: line_no })
    }
}

/// Apply a `[...]` line to the section path.
///
/// State is reset before validation: even a malformed header has already
/// dropped the pending comments and the shorthand key.
fn section_header(
    state: &mut LoadState,
    line: &str,
    trimmed: &str,
    line_no: usize,
) -> Result<(), FormatError> {
    state.last_key = None;
    state.pending_comments.clear();

    // Comments cannot appear on header lines; `;` anywhere is malformed.
    if line.contains(';') || !trimmed.ends_with(']') {
        return Err(FormatError::MalformedHeader { line: line_no });
    }

    let inner = &trimmed[1..trimmed.len() - 1];
    if inner.contains('[') || inner.contains(']') {
        return Err(FormatError::MalformedHeader { line: line_no });
    }

    let mut section = inner.to_string();
    if !(section.is_empty() || section.ends_with('.')) {
        section.push('.');
    }
    if section.starts_with('.') {
        // Relative continuation. At an empty path this yields a prefix that
        // literally starts with `.`; kept as-is.
        state.path.push_str(&section);
    } else {
        state.path = section;
    }
    Ok(())
}
