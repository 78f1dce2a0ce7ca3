//! Header cleaning
//!
//! Sentence headers carry alignment scaffolding (`#tk 1 2 3` token-index
//! lines, `#`-prefixed tags) that is meaningless in a tooltip. Cleaning
//! removes it and leaves the prose and gloss lines.

use crate::config::{ConfigError, MarkerConfig};
use regex::Regex;

/// Strips annotation markers from sentence headers
#[derive(Debug, Clone)]
pub struct HeaderCleaner {
    token_index_line: Regex,
    marker_token: Regex,
    blank_run: Regex,
}

impl HeaderCleaner {
    pub fn new(markers: &MarkerConfig) -> Result<Self, ConfigError> {
        markers.validate()?;

        let token_index_line = Regex::new(&format!(
            r"(?m)^[ \t]*{}(?:[ \t]+\d+)*[ \t]*(?:\r?\n|\z)",
            regex::escape(&markers.token_index),
        ))?;
        let marker_token = Regex::new(&format!(
            r"{}\S+[ \t]*",
            regex::escape(&markers.marker_char.to_string()),
        ))?;
        let blank_run = Regex::new(r"\n{3,}")?;

        Ok(Self {
            token_index_line,
            marker_token,
            blank_run,
        })
    }

    /// Remove token-index lines and marker tokens, then trim each line
    ///
    /// A line holding nothing but marker tokens is dropped with its line
    /// terminator. Other line structure is kept, including a trailing empty
    /// line. Cleaning clean text is a no-op.
    pub fn clean(&self, header: &str) -> String {
        let without_index = self.token_index_line.replace_all(header, "");

        without_index
            .split('\n')
            .filter_map(|line| {
                let stripped = self.marker_token.replace_all(line, "");
                let trimmed = stripped.trim();
                if trimmed.is_empty() && !line.trim().is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Collapse runs of blank lines in cleaned text to a single blank line
    pub fn collapse_blank_lines(&self, cleaned: &str) -> String {
        self.blank_run.replace_all(cleaned, "\n\n").into_owned()
    }
}

/// A cleaned header sliced into the parts a tooltip shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderLayout<'a> {
    /// Up to the first two lines (sentence text, translation)
    pub first_lines: Vec<&'a str>,
    /// Lines between the first two and the last; the gloss block
    pub middle: Vec<&'a str>,
    /// The final line, or empty when there are no lines
    pub last_line: &'a str,
}

impl<'a> HeaderLayout<'a> {
    /// Slice cleaned header text
    ///
    /// Total for any line count: an empty header has no lines at all, and
    /// headers shorter than three lines have an empty middle.
    pub fn from_cleaned(cleaned: &'a str) -> Self {
        if cleaned.is_empty() {
            return Self::default();
        }

        let lines: Vec<&str> = cleaned.split('\n').collect();
        let middle = if lines.len() >= 3 {
            lines[2..lines.len() - 1].to_vec()
        } else {
            Vec::new()
        };

        Self {
            first_lines: lines.iter().take(2).copied().collect(),
            middle,
            last_line: lines.last().copied().unwrap_or(""),
        }
    }
}
