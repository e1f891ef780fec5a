//! Pipe-delimited line tokenizer
//!
//! A line splits into `count('|') + 1` fields. Each field is trimmed of
//! leading and trailing spaces only; tabs and other whitespace inside a field
//! are kept. There is no quoting or escaping.

pub const DELIMITER: char = '|';
pub const COMMENT_MARKER: char = '#';

/// Result of tokenizing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokenized {
    /// Empty, blank or comment line
    Noop,
    /// Ordered fields; index 0 is the command code
    Fields(Vec<String>),
}

/// Split one line into trimmed fields
///
/// A trailing line terminator (`\n` or `\r\n`) is not part of the last field.
pub fn tokenize(line: &str) -> Tokenized {
    let line = line.trim_end_matches(&['\n', '\r'][..]);
    let content = line.trim();
    if content.is_empty() || content.starts_with(COMMENT_MARKER) {
        return Tokenized::Noop;
    }

    Tokenized::Fields(
        line.split(DELIMITER)
            .map(|field| field.trim_matches(' ').to_string())
            .collect(),
    )
}
