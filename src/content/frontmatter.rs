//! Front matter splitting and rendering.
//!
//! A content file looks like:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-01-15
//! ---
//! Body text starts here.
//! ```
//!
//! The opening delimiter must be the first line. The block ends at the next
//! line consisting only of the delimiter; the newline after it is consumed and
//! everything that follows is the body, untouched.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Line that opens and closes the metadata block
pub const DELIMITER: &str = "---";

/// Problems locating the metadata block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("document does not start with a '---' front matter block")]
    MissingOpening,

    #[error("front matter block is never closed with '---'")]
    Unterminated,
}

/// A source document cut into its metadata block and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Raw YAML between the delimiters
    pub metadata: &'a str,

    /// Everything after the closing delimiter line
    pub body: &'a str,
}

impl<'a> Split<'a> {
    /// Deserialize the metadata block into `T`
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_yaml::Error> {
        serde_yaml::from_str(self.metadata)
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Cut `source` into metadata and body
pub fn split(source: &str) -> Result<Split<'_>, SplitError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let first_end = source.find('\n');
    let first = &source[..first_end.unwrap_or(source.len())];
    if !is_delimiter(first) {
        return Err(SplitError::MissingOpening);
    }

    let meta_start = match first_end {
        Some(end) => end + 1,
        None => return Err(SplitError::Unterminated),
    };

    let mut offset = meta_start;
    loop {
        let line_end = source[offset..].find('\n').map(|i| offset + i);
        let line = &source[offset..line_end.unwrap_or(source.len())];

        if is_delimiter(line) {
            return Ok(Split {
                metadata: &source[meta_start..offset],
                body: line_end.map(|end| &source[end + 1..]).unwrap_or(""),
            });
        }

        match line_end {
            Some(end) => offset = end + 1,
            None => return Err(SplitError::Unterminated),
        }
    }
}

/// Render `metadata` as a front matter block followed by `body`
pub fn render<T: Serialize>(metadata: &T, body: &str) -> Result<String, serde_yaml::Error> {
    let yaml = serde_yaml::to_string(metadata)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
}
