//! Gloss alignment
//!
//! Interlinear gloss lines are shown in a monospace block with every token
//! padded to its column width, so word and gloss line up:
//!
//! ```text
//! Words:  Edmund  Pope  tasted
//! Gloss:  Edmund  Pope  taste.PST
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tokenized gloss block with per-column widths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossColumns {
    /// One row per gloss line, split on whitespace
    pub tokens: Vec<Vec<String>>,
    /// Widest token (in characters) for each column
    pub widths: Vec<usize>,
}

impl GlossColumns {
    /// The "no gloss available" placeholder
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Gloss lines with differing token counts cannot be aligned
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("gloss line {line} has {found} tokens, expected {expected}")]
pub struct AlignmentError {
    /// Zero-based index of the offending line within the block
    pub line: usize,
    /// Token count of the first line
    pub expected: usize,
    pub found: usize,
}

/// Split gloss lines into tokens and compute column widths
///
/// All lines must have the same number of tokens.
pub fn build_columns<S: AsRef<str>>(lines: &[S]) -> Result<GlossColumns, AlignmentError> {
    let Some(first) = lines.first() else {
        return Ok(GlossColumns::empty());
    };

    let expected = first.as_ref().split_whitespace().count();
    let mut tokens = Vec::with_capacity(lines.len());
    let mut widths = vec![0; expected];

    for (line, text) in lines.iter().enumerate() {
        let row: Vec<String> = text.as_ref().split_whitespace().map(String::from).collect();
        if row.len() != expected {
            return Err(AlignmentError {
                line,
                expected,
                found: row.len(),
            });
        }

        for (width, token) in widths.iter_mut().zip(&row) {
            *width = (*width).max(token.chars().count());
        }
        tokens.push(row);
    }

    Ok(GlossColumns { tokens, widths })
}
